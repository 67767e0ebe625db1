//! Data models for Biblio

pub mod author;
pub mod category;
pub mod copy;
pub mod document;
pub mod enums;
pub mod loan;
pub mod location;
pub mod member;
pub mod penalty;
pub mod publisher;
pub mod reservation;
pub mod role;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use category::Category;
pub use copy::Copy;
pub use document::Document;
pub use enums::{CopyStatus, PenaltyStatus, ReservationStatus};
pub use loan::Loan;
pub use location::Location;
pub use member::{Member, MemberType};
pub use penalty::Penalty;
pub use publisher::Publisher;
pub use reservation::Reservation;
pub use role::{Permission, Role};
pub use user::{User, UserClaims};
