//! Resolve command

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use cpt_templates::routing::{MainQuery, TemplateRequest};

use super::load_site;

/// Print the template that renders a request
#[derive(Debug)]
pub struct ResolveCommand {
    config: PathBuf,
    request: TemplateRequest,
    default: PathBuf,
}

impl ResolveCommand {
    /// Create a resolve command
    pub const fn new(config: PathBuf, request: TemplateRequest, default: PathBuf) -> Self {
        Self {
            config,
            request,
            default,
        }
    }

    /// Execute the resolve command
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be assembled or routing fails.
    pub fn execute(self) -> Result<()> {
        let site = load_site(&self.config)?;
        let template = site.template_for(&self.request, self.default.clone())?;

        if template == self.default {
            println!(
                "{} {}",
                style("host default:").yellow(),
                template.display()
            );
        } else {
            println!("{}", template.display());
        }

        if let TemplateRequest::Taxonomy(slug) = &self.request {
            let mut query = MainQuery::for_taxonomy(slug.clone());
            site.prepare_query(&mut query);
            if !query.content_types().is_empty() {
                println!(
                    "{} {}",
                    style("content types:").dim(),
                    query.content_types().join(", ")
                );
            }
        }

        Ok(())
    }
}
