use crate::device_permission::interface::{DevicePermission, PermissionScope, PermissionStatus};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub struct DevicePermissionFake {
    logger: Arc<dyn Logger + Send + Sync>,
    camera: PermissionStatus,
    photo_library: PermissionStatus,
}

impl DevicePermissionFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        camera: PermissionStatus,
        photo_library: PermissionStatus,
    ) -> Self {
        Self {
            logger: logger.with_namespace("permission").with_namespace("fake"),
            camera,
            photo_library,
        }
    }

    pub fn granted(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::new(logger, PermissionStatus::Granted, PermissionStatus::Granted)
    }
}

impl DevicePermission for DevicePermissionFake {
    fn request(
        &self,
        scope: PermissionScope,
    ) -> Result<PermissionStatus, Box<dyn std::error::Error + Send + Sync>> {
        let status = match scope {
            PermissionScope::Camera => self.camera,
            PermissionScope::PhotoLibrary => self.photo_library,
        };
        self.logger
            .info(&format!("Permission {:?} answered {:?}", scope, status))?;
        Ok(status)
    }
}
