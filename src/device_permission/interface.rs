#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionScope {
    Camera,
    PhotoLibrary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

pub trait DevicePermission {
    /// Prompts for access to `scope` and blocks until the user answers.
    fn request(
        &self,
        scope: PermissionScope,
    ) -> Result<PermissionStatus, Box<dyn std::error::Error + Send + Sync>>;
}
