//! Check command

use std::path::PathBuf;

use anyhow::Result;
use console::{style, Emoji};
use cpt_templates::template::TemplateKind;

use super::load_site;

static SUCCESS: Emoji = Emoji("✓", "√");
static WARNING: Emoji = Emoji("⚠", "!");

/// Register every configured group and summarize the result
#[derive(Debug)]
pub struct CheckCommand {
    config: PathBuf,
}

impl CheckCommand {
    /// Create a check command
    pub const fn new(config: PathBuf) -> Self {
        Self { config }
    }

    /// Execute the check command
    ///
    /// # Errors
    ///
    /// Returns an error if any group fails to register.
    pub fn execute(self) -> Result<()> {
        let site = load_site(&self.config)?;

        for (index, group) in site.groups().iter().enumerate() {
            println!(
                "{} group {} ({})",
                style(SUCCESS).green(),
                index + 1,
                group.base_template_directory()
            );

            if let Some(content_type) = group.content_type() {
                println!("    content type: {}", style(content_type.slug()).bold());
                for kind in [TemplateKind::Archive, TemplateKind::Single] {
                    let captured = match kind {
                        TemplateKind::Single => group.captures_single(),
                        _ => group.captures_archive(),
                    };
                    let name = group.template_name(kind, content_type.slug());
                    Self::print_template(&name, captured);
                }
            }

            if let Some(taxonomy) = group.taxonomy() {
                println!(
                    "    taxonomy: {} -> [{}]",
                    style(taxonomy.slug()).bold(),
                    taxonomy.object_types().join(", ")
                );
                let name = group.template_name(TemplateKind::Taxonomy, taxonomy.slug());
                Self::print_template(&name, group.captures_archive());
            }
        }

        if site.groups().is_empty() {
            println!("{} no groups configured", style(WARNING).yellow());
        }

        Ok(())
    }

    fn print_template(name: &str, captured: bool) {
        if captured {
            println!("      {name}");
        } else {
            println!("      {} {}", style(name).dim(), style("(not captured)").dim());
        }
    }
}
