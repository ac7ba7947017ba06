use alg_attrs::ErrorKind;
use alg_error::ErrorKind;

/// Attempted to install a process-wide function registry after it was already initialized.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the global function registry is already initialized",
    help = "install the registry before parsing, building, or simplifying any expression",
)]
pub struct RegistryInitialized;
