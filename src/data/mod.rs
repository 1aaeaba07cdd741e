//! Family data: records, the group registry and hydration.

pub mod edit;
pub mod groups;
pub mod history;
pub mod hydrate;
pub mod sample;
pub mod storage;
pub mod types;

pub use groups::royal_family_groups;
pub use history::History;
pub use hydrate::{Assignment, GroupHydrator, HydrateError, HydrateIssue};
pub use types::{ChartNode, FamilyGroup, FamilyMember, Gender, GroupKey, MemberKey, Relationship};
