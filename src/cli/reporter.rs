use colored::Colorize;

use enumstr_common::{Diagnostic, DiagnosticCategory};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if diagnostic.type_name.is_empty() {
            output.push_str("<unknown>");
        } else if self.color {
            output.push_str(&diagnostic.type_name.cyan().to_string());
        } else {
            output.push_str(&diagnostic.type_name);
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// One-line tally, `None` when there is nothing to report.
    pub fn summary(&self, diagnostics: &[Diagnostic]) -> Option<String> {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        if errors == 0 {
            return None;
        }
        let noun = if errors == 1 { "error" } else { "errors" };
        let line = format!("Found {errors} {noun}.");
        Some(if self.color {
            line.bold().to_string()
        } else {
            line
        })
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
        };

        if !self.color {
            return label.to_string();
        }

        label.red().bold().to_string()
    }

    fn format_code(&self, code: &str) -> String {
        if code.is_empty() {
            return String::new();
        }

        if self.color {
            code.bright_blue().to_string()
        } else {
            code.to_string()
        }
    }
}
