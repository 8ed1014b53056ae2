//! Interactive form state: field editors, previews and the submit/clear actions

pub mod controller;
pub mod preview;
pub mod session;
pub mod view;

pub use controller::{FormController, SubmitReceipt, SubmitStatus};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use session::FormSession;
pub use view::{FormView, ItemView, PhotoAttachment};
