// External collaborator seams and process plumbing
pub mod foreground; // Foreground application queries for pausing
pub mod hotkeys; // Hotkey actions and registration
pub mod signals; // Unix signal handling
