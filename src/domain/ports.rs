use crate::domain::model::Registry;
use crate::utils::error::Result;

/// 載入服務登錄檔的來源
pub trait RegistryLoader {
    fn load(&self) -> Result<Registry>;
}
