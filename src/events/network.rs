use crate::content::{Content, DETAIL_FALLBACK};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    ProjectManifest,
    ProjectTitles,
    ProjectDetail { id: String },
    ContactFragment,
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    content: &'a Content,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, content: &'a Content) -> Self {
        Handler { state, content }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::ProjectManifest => self.project_manifest().await?,
            Event::ProjectTitles => self.project_titles().await?,
            Event::ProjectDetail { id } => self.project_detail(id).await?,
            Event::ContactFragment => self.contact_fragment().await?,
        }
        Ok(())
    }

    /// Update state with the works-grid project list.
    ///
    async fn project_manifest(&mut self) -> Result<()> {
        info!("Fetching project manifest...");
        let projects = self.content.project_manifest().await;
        let mut state = self.state.lock().await;
        state.set_projects(projects);
        info!("Loaded project manifest.");
        Ok(())
    }

    /// Update state with the title of every known project. Failed titles
    /// keep their placeholder; the grid renders regardless.
    ///
    async fn project_titles(&mut self) -> Result<()> {
        info!("Fetching project titles...");
        let projects = {
            let state = self.state.lock().await;
            state.projects().to_vec()
        };
        for project in &projects {
            match self.content.project_title(project).await {
                Ok(title) => {
                    let mut state = self.state.lock().await;
                    state.set_project_title(&project.id, title);
                }
                Err(e) => warn!("Failed to fetch title for '{}': {}", project.id, e),
            }
        }
        info!("Loaded project titles.");
        Ok(())
    }

    /// Update state with a project's detail fragment. A failed fetch stores
    /// the fallback body so the detail view never stays on its placeholder.
    ///
    async fn project_detail(&mut self, id: String) -> Result<()> {
        info!("Fetching detail fragment for project '{}'...", id);
        let body = match self.content.project_detail(&id).await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch detail for '{}': {}", id, e);
                DETAIL_FALLBACK.to_owned()
            }
        };
        let mut state = self.state.lock().await;
        state.set_project_detail(&id, body);
        Ok(())
    }

    /// Update state with the contact-section fragment.
    ///
    async fn contact_fragment(&mut self) -> Result<()> {
        info!("Fetching contact fragment...");
        let body = match self.content.contact_fragment().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch contact fragment: {}", e);
                DETAIL_FALLBACK.to_owned()
            }
        };
        let mut state = self.state.lock().await;
        state.set_contact_html(body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::new_shared_state;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn project_detail_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/projects/project-3/detail.html");
            then.status(200).body("<h1>Projekt 3</h1>");
        });

        let (state, _rx) = new_shared_state();
        let content = Content::new(&server.base_url());
        let mut handler = Handler::new(&state, &content);
        handler
            .handle(Event::ProjectDetail {
                id: "project-3".to_owned(),
            })
            .await?;

        mock.assert();
        let state = state.lock().await;
        assert_eq!(
            state.project_detail("project-3"),
            Some("<h1>Projekt 3</h1>")
        );
        Ok(())
    }

    #[tokio::test]
    async fn project_detail_falls_back_on_error() -> Result<()> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/projects/project-3/detail.html");
            then.status(404);
        });

        let (state, _rx) = new_shared_state();
        let content = Content::new(&server.base_url());
        let mut handler = Handler::new(&state, &content);
        handler
            .handle(Event::ProjectDetail {
                id: "project-3".to_owned(),
            })
            .await?;

        let state = state.lock().await;
        assert_eq!(state.project_detail("project-3"), Some(DETAIL_FALLBACK));
        Ok(())
    }

    #[tokio::test]
    async fn contact_fragment_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/kontakt/content.html");
            then.status(200).body("<p>Kontakt</p>");
        });

        let (state, _rx) = new_shared_state();
        let content = Content::new(&server.base_url());
        let mut handler = Handler::new(&state, &content);
        handler.handle(Event::ContactFragment).await?;

        mock.assert();
        let state = state.lock().await;
        assert_eq!(state.contact_html(), Some("<p>Kontakt</p>"));
        Ok(())
    }

    #[tokio::test]
    async fn project_titles_fill_grid() -> Result<()> {
        let server = MockServer::start();
        for index in 1..=6 {
            server.mock(|when, then| {
                when.method(GET)
                    .path(format!("/projects/project-{}/title.txt", index));
                then.status(200).body(format!("Projekt {}\n", index));
            });
        }

        let (state, _rx) = new_shared_state();
        {
            let mut state = state.lock().await;
            state.set_projects(crate::content::default_projects());
        }
        let content = Content::new(&server.base_url());
        let mut handler = Handler::new(&state, &content);
        handler.handle(Event::ProjectTitles).await?;

        let state = state.lock().await;
        assert_eq!(state.project_title("project-1"), Some("Projekt 1"));
        assert_eq!(state.project_title("project-6"), Some("Projekt 6"));
        Ok(())
    }
}
