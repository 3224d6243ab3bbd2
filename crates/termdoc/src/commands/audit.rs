//! `termdoc audit`: WCAG AA contrast checks for bundled palettes.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Serialize;
use termdoc_contrast::{Cascade, PaletteAudit, Stylesheet};
use termdoc_palette::BundledPalettes;

use crate::cli::AuditArgs;
use crate::output::{Report, Styles};

/// A palette that could not be audited.
#[derive(Debug, Clone, Serialize)]
pub struct AuditProblem {
    pub palette: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AuditReport {
    pub palettes_dir: PathBuf,
    pub audits: Vec<PaletteAudit>,
    pub errors: Vec<AuditProblem>,
}

impl AuditReport {
    /// Returns true if every palette was audited and every check passed.
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.audits.iter().all(PaletteAudit::passed)
    }
}

pub fn run(args: &AuditArgs) -> anyhow::Result<AuditReport> {
    let bundled = BundledPalettes::discover(&args.palettes_dir).with_context(|| {
        format!(
            "Failed to read palette directory {}",
            args.palettes_dir.display()
        )
    })?;
    if bundled.is_empty() {
        bail!(
            "No palette stylesheets found in {}",
            args.palettes_dir.display()
        );
    }

    let palettes: Vec<String> = if args.palettes.is_empty() {
        bundled.names().map(str::to_string).collect()
    } else {
        for name in &args.palettes {
            if !bundled.contains(name) {
                bail!(
                    "Unknown palette '{}'. Available: {}",
                    name,
                    bundled.names().collect::<Vec<_>>().join(", ")
                );
            }
        }
        args.palettes.clone()
    };

    let mut base = Cascade::new();
    for path in &args.base_css {
        let sheet = Stylesheet::from_file(path)
            .with_context(|| format!("Failed to load base stylesheet {}", path.display()))?;
        base.push(sheet);
    }

    let mut audits = Vec::new();
    let mut errors = Vec::new();
    for palette in palettes {
        let path = args.palettes_dir.join(format!("{palette}.css"));
        let result = Stylesheet::from_file(&path)
            .map_err(|e| e.to_string())
            .and_then(|sheet| {
                let vars = base.clone().with(sheet).resolve(&palette);
                PaletteAudit::run(&palette, &vars).map_err(|e| e.to_string())
            });

        match result {
            Ok(audit) => audits.push(audit),
            Err(message) => {
                tracing::warn!(palette = %palette, "{}", message);
                errors.push(AuditProblem { palette, message });
            }
        }
    }

    Ok(AuditReport {
        palettes_dir: args.palettes_dir.clone(),
        audits,
        errors,
    })
}

impl Report for AuditReport {
    fn render_text(&self, styles: &Styles) -> String {
        let mut out = String::new();

        for audit in &self.audits {
            let status = if audit.passed() {
                styles.good("PASS")
            } else {
                styles.bad("FAIL")
            };
            let _ = writeln!(
                out,
                "{} {}  {}",
                status,
                styles.heading(&audit.palette),
                styles.muted(&format!("({}px)", audit.font_size_px))
            );

            let width = audit.checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
            for check in &audit.checks {
                let ratio = match check.ratio {
                    Some(ratio) => format!("{:>5.2}:1", ratio),
                    None => "    n/a".to_string(),
                };
                let mark = if check.passed {
                    styles.good("ok")
                } else {
                    styles.bad("low")
                };
                let _ = writeln!(
                    out,
                    "  {:<width$}  {}  (min {}:1)  {}  {} on {}",
                    check.name,
                    ratio,
                    check.required,
                    mark,
                    styles.muted(&check.foreground),
                    styles.muted(&check.background),
                    width = width,
                );
            }
        }

        for problem in &self.errors {
            let _ = writeln!(
                out,
                "{} {}  {}",
                styles.bad("ERROR"),
                styles.heading(&problem.palette),
                problem.message
            );
        }

        let failed = self.audits.iter().filter(|a| !a.passed()).count() + self.errors.len();
        let total = self.audits.len() + self.errors.len();
        if failed == 0 {
            let _ = write!(
                out,
                "{}",
                styles.good(&format!("All {} palettes pass WCAG AA", total))
            );
        } else {
            let _ = write!(
                out,
                "{}",
                styles.bad(&format!("{} of {} palettes fail WCAG AA", failed, total))
            );
        }
        out
    }
}
