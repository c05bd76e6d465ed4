// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum Template {
    #[default]
    Article,
    Letter,
    Resume,
    Report,
    Math,
    Presentation,
}

impl Template {
    pub fn source(self) -> &'static str {
        match self {
            Template::Article => ARTICLE,
            Template::Letter => LETTER,
            Template::Resume => RESUME,
            Template::Report => REPORT,
            Template::Math => MATH,
            Template::Presentation => PRESENTATION,
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Article => write!(f, "article"),
            Template::Letter => write!(f, "letter"),
            Template::Resume => write!(f, "resume"),
            Template::Report => write!(f, "report"),
            Template::Math => write!(f, "math"),
            Template::Presentation => write!(f, "presentation"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum ListKind {
    Itemize,
    Enumerate,
}

impl ListKind {
    pub fn environment(self) -> &'static str {
        match self {
            ListKind::Itemize => "itemize",
            ListKind::Enumerate => "enumerate",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum MathKind {
    Inline,
    Display,
}

impl MathKind {
    /// The delimiters placed around the selection.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            MathKind::Inline => ("$", "$"),
            MathKind::Display => ("\\[", "\\]"),
        }
    }
}

pub fn list_snippet(kind: ListKind) -> String {
    let env = kind.environment();
    format!(
        "\\begin{{{env}}}\n\\item First item\n\\item Second item\n\\item Third item\n\\end{{{env}}}\n\n",
        env = env
    )
}

pub const TABLE_SNIPPET: &str = r"\begin{table}[h]
\centering
\begin{tabular}{|c|c|c|}
\hline
Header 1 & Header 2 & Header 3 \\
\hline
Row 1, Col 1 & Row 1, Col 2 & Row 1, Col 3 \\
Row 2, Col 1 & Row 2, Col 2 & Row 2, Col 3 \\
\hline
\end{tabular}
\caption{Your table caption}
\end{table}

";

const ARTICLE: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\title{My Article}
\author{Your Name}
\date{\today}

\begin{document}
\maketitle

\section{Introduction}
Write your introduction here...

\section{Main Content}
Write your main content here...

\section{Conclusion}
Write your conclusion here...

\end{document}";

const LETTER: &str = r"\documentclass{letter}
\usepackage[utf8]{inputenc}

\address{Your Name\\Your Address\\Your City, State ZIP}
\signature{Your Name}

\begin{document}

\begin{letter}{Recipient Name\\Recipient Address\\City, State ZIP}

\opening{Dear Sir/Madam,}

Write your letter content here...

\closing{Sincerely,}

\end{letter}
\end{document}";

const RESUME: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}

\title{\textbf{Your Name}}
\author{your.email@example.com | (123) 456-7890}
\date{}

\begin{document}
\maketitle

\section*{Experience}
\textbf{Job Title} - Company Name \hfill Date Range\\
Description of your role and achievements...

\section*{Education}
\textbf{Degree} - University Name \hfill Year\\
Relevant coursework or achievements...

\section*{Skills}
List your skills here...

\end{document}";

const REPORT: &str = r"\documentclass{report}
\usepackage[utf8]{inputenc}
\title{Report Title}
\author{Your Name}
\date{\today}

\begin{document}
\maketitle
\tableofcontents

\chapter{Introduction}
Write your introduction here...

\chapter{Methodology}
Describe your methodology...

\chapter{Results}
Present your results...

\chapter{Conclusion}
Write your conclusion...

\end{document}";

const MATH: &str = r"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath}
\usepackage{amsfonts}
\title{Mathematical Document}
\author{Your Name}
\date{\today}

\begin{document}
\maketitle

\section{Equations}
Here's an inline equation: $E = mc^2$

Here's a display equation:
\[\int_0^\infty e^{-x^2} dx = \frac{\sqrt{\pi}}{2}\]

\section{Matrix}
\[\begin{bmatrix}
a & b \\
c & d
\end{bmatrix}\]

\end{document}";

const PRESENTATION: &str = r"\documentclass{beamer}
\usetheme{Madrid}
\title{Presentation Title}
\author{Your Name}
\date{\today}

\begin{document}

\frame{\titlepage}

\begin{frame}
\frametitle{Introduction}
\begin{itemize}
\item First point
\item Second point
\item Third point
\end{itemize}
\end{frame}

\begin{frame}
\frametitle{Main Content}
Your main content here...
\end{frame}

\end{document}";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode;

    #[test]
    fn test_template_names_match_cli_values() {
        use clap::ValueEnum;

        for template in Template::value_variants() {
            let value = template.to_possible_value().unwrap();
            assert_eq!(value.get_name(), template.to_string());
        }
        assert!(Template::from_str("memo", false).is_err());
    }

    #[test]
    fn test_article_preview() {
        let html = transcode::to_html(Template::Article.source());
        assert!(html.starts_with("<p><h1>My Article</h1>"));
        assert!(html.contains("<p><strong>By: Your Name</strong></p>"));
        assert_eq!(html.matches("<h2>").count(), 3);
        assert!(!html.contains("documentclass"));
        assert!(!html.contains("today"));
    }

    #[test]
    fn test_math_preview_keeps_matrix() {
        let html = transcode::to_html(Template::Math.source());
        assert!(html.contains("$E = mc^2$"));
        assert!(html.contains("$$\\begin{bmatrix}\na &amp; b \\\\\nc &amp; d\n\\end{bmatrix}$$"));
    }

    #[test]
    fn test_presentation_preview() {
        let html = transcode::to_html(Template::Presentation.source());
        assert!(html.contains("<h3>Introduction</h3>"));
        assert!(html.contains("<li>First point </li>"));
        assert!(!html.contains("titlepage"));
        assert!(!html.contains("Madrid"));
    }

    #[test]
    fn test_table_snippet_renders_grid() {
        let html = transcode::to_html(TABLE_SNIPPET);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert_eq!(html.matches("</td>").count(), 9);
    }

    #[test]
    fn test_list_snippet() {
        assert_eq!(
            list_snippet(ListKind::Enumerate),
            "\\begin{enumerate}\n\\item First item\n\\item Second item\n\\item Third item\n\\end{enumerate}\n\n"
        );
    }
}
