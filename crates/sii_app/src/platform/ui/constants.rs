pub const TITLE: &str = "SII Decode (beta)";
pub const DOWNLOAD_LABEL: &str = "Download";
pub const NO_SELECTION: &str = "Select your file";
pub const FOOTER: &str = "Your file never leaves this machine; it is decoded locally.";
