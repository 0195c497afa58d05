mod client;
mod error;
mod resource;

pub use error::ContentError;
pub use resource::*;

use anyhow::Result;
use client::Client;
use log::*;

/// Placeholder shown while a fragment request is in flight.
pub const LOADING_PLACEHOLDER: &str = "Loading…";

/// Fallback body when a detail fragment cannot be fetched.
pub const DETAIL_FALLBACK: &str = "<p>Inhalt konnte nicht geladen werden.</p>";

/// Responsible for asynchronous retrieval of the static presentation
/// fragments (project titles, detail bodies, the contact block) relative
/// to a base URL.
///
pub struct Content {
    client: Client,
}

impl Content {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Content {
        debug!("Initializing content fetcher with base URL {}...", base_url);
        Content {
            client: Client::new(base_url),
        }
    }

    /// Returns the title text for a project, trimmed of trailing whitespace.
    ///
    pub async fn project_title(&self, project: &ProjectEntry) -> Result<String> {
        debug!("Requesting title for project '{}'...", project.id);
        let text = self.client.get_text(&project.title_path).await?;
        Ok(text.trim_end().to_owned())
    }

    /// Returns the detail fragment for a project as raw markup.
    ///
    pub async fn project_detail(&self, project_id: &str) -> Result<String> {
        debug!("Requesting detail fragment for project '{}'...", project_id);
        let path = format!("projects/{}/detail.html", project_id);
        Ok(self.client.get_text(&path).await?)
    }

    /// Returns the contact-section fragment as raw markup.
    ///
    pub async fn contact_fragment(&self) -> Result<String> {
        debug!("Requesting contact fragment...");
        Ok(self.client.get_text("kontakt/content.html").await?)
    }

    /// Returns the works-grid manifest, falling back to the built-in list
    /// when the server does not ship one.
    ///
    pub async fn project_manifest(&self) -> Vec<ProjectEntry> {
        match self.client.get_text("projects/manifest.json").await {
            Ok(json) => match parse_manifest(&json) {
                Ok(projects) => projects,
                Err(e) => {
                    warn!("Ignoring invalid project manifest: {}", e);
                    default_projects()
                }
            },
            Err(_) => default_projects(),
        }
    }
}
