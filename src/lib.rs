pub mod assigner;
pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod pipeline;
pub mod sampler;
pub mod selection;
pub mod services;

pub use error::AssignmentError;
pub use event::PullRequestContext;
pub use github::{GitHubClient, ParentTeam, Team, TeamMember};
pub use selection::CandidateTeam;
