use crate::domain::model::Service;

/// Fields a caller may select with `--select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Port,
    Description,
    Tcp,
    Udp,
    Status,
}

impl ServiceField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "port" => Some(Self::Port),
            "description" => Some(Self::Description),
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    /// Output column the field shows up in; tcp and udp share the protocol column.
    fn column(&self) -> usize {
        match self {
            Self::Port => 0,
            Self::Description => 1,
            Self::Tcp | Self::Udp => 2,
            Self::Status => 3,
        }
    }

    fn copy(&self, from: &Service, to: &mut Service) {
        match self {
            Self::Port => to.port = from.port.clone(),
            Self::Description => to.description = from.description.clone(),
            Self::Tcp => to.tcp = from.tcp,
            Self::Udp => to.udp = from.udp,
            Self::Status => to.status = from.status.clone(),
        }
    }
}

/// 使用者選擇的欄位清單，無法辨識的名稱直接略過
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<ServiceField>,
}

impl FieldSelection {
    pub fn parse(list: &str) -> Self {
        let fields = list
            .split(',')
            .filter_map(|name| {
                let field = ServiceField::from_name(name);
                if field.is_none() && !name.is_empty() {
                    tracing::debug!("Ignoring unknown field '{}'", name);
                }
                field
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[ServiceField] {
        &self.fields
    }

    /// 選取的欄位會輸出成幾個欄 (port, description, protocol, status)
    pub fn columns(&self) -> usize {
        let mut used = [false; 4];
        for field in &self.fields {
            used[field.column()] = true;
        }
        used.iter().filter(|used| **used).count()
    }

    pub fn project(&self, service: &Service) -> Service {
        let mut projected = Service::default();
        for field in &self.fields {
            field.copy(service, &mut projected);
        }
        projected
    }

    pub fn project_all(&self, services: &[Service]) -> Vec<Service> {
        services.iter().map(|service| self.project(service)).collect()
    }
}
