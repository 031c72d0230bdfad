use time::macros::format_description;

use common::prelude::{Crumb, FolderEntry, NavigatorError};
use service::{FolderQuery, ServiceState, ServiceStateSetupError};

#[derive(Debug, thiserror::Error)]
pub enum FoldersLsError {
    #[error("state error: {0}")]
    State(#[from] ServiceStateSetupError),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    #[error("failed to format date: {0}")]
    Format(#[from] time::error::Format),
}

pub fn render_trail(crumbs: &[Crumb]) -> String {
    std::iter::once("Home")
        .chain(crumbs.iter().map(|c| c.name.as_str()))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn render_entry(entry: &FolderEntry) -> Result<String, time::error::Format> {
    let modified = entry
        .modified_at
        .format(format_description!("[year]-[month]-[day]"))?;
    Ok(match &entry.size {
        Some(size) => format!("{} (file, {}) {} [{}]", entry.name, size, modified, entry.id),
        None if entry.is_folder() => format!("{}/ {} [{}]", entry.name, modified, entry.id),
        None => format!("{} (file) {} [{}]", entry.name, modified, entry.id),
    })
}

#[async_trait::async_trait]
impl crate::op::Op for FolderQuery {
    type Error = FoldersLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ServiceState::from_config(&ctx.service)?;
        let mut session = state.folder_session();

        session.navigate_to(&self.folder_id())?;
        if let Some(search) = &self.search {
            session.set_search(search.as_str());
        }

        let mut lines = vec![render_trail(&session.breadcrumbs())];
        let listing = session.listing();
        if listing.is_empty() {
            lines.push("No items found".to_string());
        }
        for entry in &listing {
            lines.push(render_entry(entry)?);
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{Op, OpContext};

    fn ctx(dir: &tempfile::TempDir) -> OpContext {
        OpContext::new(Some(dir.path().to_path_buf())).unwrap()
    }

    #[tokio::test]
    async fn test_ls_root() {
        let dir = tempfile::tempdir().unwrap();
        let output = FolderQuery::default().execute(&ctx(&dir)).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Home");
        assert_eq!(lines[1], "Documents/ 2023-06-15 [folder1]");
        assert!(lines.iter().any(|l| l.starts_with("Project Report.pdf (file, 2.4 MB)")));
    }

    #[tokio::test]
    async fn test_ls_nested_with_trail() {
        let dir = tempfile::tempdir().unwrap();
        let query = FolderQuery {
            folder: Some("folder3".to_string()),
            search: None,
        };
        let output = query.execute(&ctx(&dir)).await.unwrap();
        assert_eq!(output, "Home / Documents / Work\nNo items found");
    }

    #[tokio::test]
    async fn test_ls_search_and_unknown_folder() {
        let dir = tempfile::tempdir().unwrap();
        let query = FolderQuery {
            folder: Some("folder2".to_string()),
            search: Some("PROFILE".to_string()),
        };
        let output = query.execute(&ctx(&dir)).await.unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("Profile.png"));

        let query = FolderQuery {
            folder: Some("nowhere".to_string()),
            search: None,
        };
        assert!(matches!(
            query.execute(&ctx(&dir)).await,
            Err(FoldersLsError::Navigator(NavigatorError::FolderNotFound(_)))
        ));
    }
}
