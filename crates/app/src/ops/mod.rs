pub mod demo;
pub mod folders;
pub mod init;
pub mod records;
pub mod version;

pub use demo::Demo;
pub use folders::Folders;
pub use init::Init;
pub use records::Records;
pub use version::Version;
