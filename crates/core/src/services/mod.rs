mod vault;

pub use vault::VaultService;
