mod page;
pub use self::page::Page;

mod reference;
pub use self::reference::Reference;

mod account;
pub use self::account::{Account, AccountID};

mod access_profile;
pub use self::access_profile::AccessProfile;

mod transform;
pub use self::transform::Transform;

mod workgroup;
pub use self::workgroup::Workgroup;

mod search;
pub use self::search::{document_name, document_type, SearchDocument};
