#[cfg(feature = "encode")]
pub mod cli;
#[cfg(feature = "encode")]
pub mod encode;
pub mod error;
pub mod logging;
pub mod options;
pub mod qr;
pub mod response;

#[cfg(feature = "encode")]
pub use cli::run;
#[cfg(feature = "encode")]
pub use encode::{generate_qr_data_url, generate_qr_data_url_with, render_bitmap, render_png};
pub use error::{Error, GenerationError};
pub use options::{ErrorCorrection, RenderOptions};
#[cfg(feature = "encode")]
pub use qr::QrcodeBackend;
pub use qr::{ModuleGrid, QrBackend};
#[cfg(feature = "decode")]
pub use qr::{decode_data_url, decode_png};
pub use response::Response;
