//! Native blocking dialogs
//!
//! Destructive actions go through a yes/no gate; validation failures raise
//! a blocking alert. On platforms without native dialogs the confirm gate
//! refuses, so destructive actions never run unconfirmed.

/// Blocking Ok/Cancel confirmation, true if the user confirmed
#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(title: &str, message: &str) -> bool {
    let result = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::OkCancel)
        .show();
    matches!(result, rfd::MessageDialogResult::Ok)
}

#[cfg(target_arch = "wasm32")]
pub fn confirm(_title: &str, message: &str) -> bool {
    println!("Confirmation unavailable, refusing: {}", message);
    false
}

/// Blocking alert with a single Ok button
#[cfg(not(target_arch = "wasm32"))]
pub fn alert(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(target_arch = "wasm32")]
pub fn alert(title: &str, message: &str) {
    println!("{}: {}", title, message);
}

/// Open a file picker filtered to image files, returning the chosen path
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_image_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
        .pick_file()
}

#[cfg(target_arch = "wasm32")]
pub fn pick_image_file() -> Option<std::path::PathBuf> {
    None
}
