//! Read-only server functions for members, submissions and genres.

use dioxus::prelude::*;
use queue_core::{GenreFamily, Member, Submission};

/// List all members, alphabetical by name.
#[get("/api/members")]
pub async fn list_members() -> Result<Vec<Member>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        db::repositories::MemberRepository::list()
            .await
            .map_err(|e| ServerFnError::new(format!("Failed to list members: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// List submissions, optionally only those with the given status.
#[get("/api/submissions")]
pub async fn list_submissions(status: Option<String>) -> Result<Vec<Submission>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::{SubmissionFilter, SubmissionRepository};
        use queue_core::SubmissionStatus;

        let filter = match status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => SubmissionFilter::status(
                SubmissionStatus::parse(s)
                    .ok_or_else(|| ServerFnError::new(format!("Unknown submission status: {}", s)))?,
            ),
            None => SubmissionFilter::default(),
        };

        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        SubmissionRepository::list(filter)
            .await
            .map_err(|e| ServerFnError::new(format!("Failed to list submissions: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// List the genre families used to classify submissions.
#[get("/api/genres")]
pub async fn list_genre_families() -> Result<Vec<GenreFamily>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        db::repositories::GenreRepository::list_families()
            .await
            .map_err(|e| ServerFnError::new(format!("Failed to list genres: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
