//! `termdoc resolve`: resolve a site's palette configuration.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use termdoc_palette::{BundledPalettes, PaletteContext, PaletteKind, PaletteWarning};

use crate::cli::ResolveArgs;
use crate::output::{Report, Styles};
use crate::site::SiteConfig;

/// What templates would receive, plus the diagnostics behind it.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub config: PathBuf,
    pub palettes_dir: PathBuf,
    pub palette: PaletteContext,
    pub bundled_palettes: BundledPalettes,
    pub warnings: Vec<PaletteWarning>,
}

impl ResolveReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub fn run(args: &ResolveArgs) -> anyhow::Result<ResolveReport> {
    let site = SiteConfig::load(&args.config)?;

    let palettes_dir = match &args.palettes_dir {
        Some(dir) => dir.clone(),
        None => site.palettes_dir(&args.config).with_context(|| {
            format!(
                "No palette directory: {} sets no theme.custom_dir; pass --palettes-dir",
                args.config.display()
            )
        })?,
    };
    tracing::info!(
        theme = site.theme_name().unwrap_or("(unset)"),
        dir = %palettes_dir.display(),
        "resolving palette configuration"
    );

    let config = termdoc_palette::resolve(site.palette(), &palettes_dir, &site.extra_css)
        .context("Failed to resolve palette configuration")?;
    config.log_warnings();

    Ok(ResolveReport {
        config: args.config.clone(),
        palettes_dir,
        palette: PaletteContext::from(&config),
        bundled_palettes: config.bundled_palettes.clone(),
        warnings: config.warnings,
    })
}

impl Report for ResolveReport {
    fn render_text(&self, styles: &Styles) -> String {
        let mut out = String::new();
        let palette = &self.palette;

        let _ = writeln!(
            out,
            "{} {}",
            styles.heading("Palette configuration:"),
            self.config.display()
        );
        let _ = writeln!(
            out,
            "  default   {}  {}",
            palette.data_palette,
            styles.muted(&palette.default_href)
        );

        if palette.selector_enabled {
            let _ = writeln!(out, "  selector  {}", palette.selector_ui);
        } else {
            let _ = writeln!(out, "  selector  {}", styles.muted("disabled"));
        }

        if !palette.options.is_empty() {
            let _ = writeln!(out, "  options");
            let name_width = palette.options.iter().map(|o| o.name.len()).max().unwrap_or(0);
            let label_width = palette.options.iter().map(|o| o.label.len()).max().unwrap_or(0);
            for option in &palette.options {
                let kind = match option.kind {
                    PaletteKind::Bundled => "",
                    PaletteKind::Custom => "  [custom]",
                };
                let _ = writeln!(
                    out,
                    "    {:<nw$}  {:<lw$}  {}{}",
                    option.name,
                    option.label,
                    styles.muted(&option.href),
                    kind,
                    nw = name_width,
                    lw = label_width,
                );
            }
        }

        let bundled: Vec<&str> = self.bundled_palettes.names().collect();
        let _ = writeln!(
            out,
            "  bundled   {}",
            if bundled.is_empty() {
                styles.muted("(none)")
            } else {
                bundled.join(", ")
            }
        );

        if self.warnings.is_empty() {
            let _ = write!(out, "{}", styles.good("No warnings"));
        } else {
            let _ = writeln!(
                out,
                "{}",
                styles.warn(&format!("Warnings ({}):", self.warnings.len()))
            );
            let lines: Vec<String> = self
                .warnings
                .iter()
                .map(|w| format!("  {} {}", styles.warn("!"), w))
                .collect();
            out.push_str(&lines.join("\n"));
        }
        out
    }
}
