use serde::Serialize;

/// Pricing category selected at the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Adult,
    Child,
    Courtesy,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Adult => "Adult",
            Category::Child => "Child",
            Category::Courtesy => "Courtesy",
        }
    }

    /// Parse a sheet/CLI label. Labels written by the first Portuguese
    /// sheets ("Adulto", "Criança", "Cortesia") are accepted too.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "adult" | "adulto" | "a" => Some(Category::Adult),
            "child" | "criança" | "crianca" | "c" => Some(Category::Child),
            "courtesy" | "cortesia" | "k" => Some(Category::Courtesy),
            _ => None,
        }
    }
}

/// Payment status shown next to every guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Paying,
    Exempt,
    Courtesy,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paying => "Paying",
            PaymentStatus::Exempt => "Exempt",
            PaymentStatus::Courtesy => "Courtesy",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paying" | "pagante" => Some(PaymentStatus::Paying),
            "exempt" | "isento" => Some(PaymentStatus::Exempt),
            "courtesy" | "cortesia" => Some(PaymentStatus::Courtesy),
            _ => None,
        }
    }

    pub fn is_paying(&self) -> bool {
        matches!(self, PaymentStatus::Paying)
    }
}

/// Delivery state of a guest row towards the shared sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncState {
    /// No sheet configured (offline mode).
    Local,
    /// Handed to a background writer, no confirmation yet.
    Pending,
    Synced,
    Failed,
}

impl SyncState {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SyncState::Local => "local",
            SyncState::Pending => "pending",
            SyncState::Synced => "synced",
            SyncState::Failed => "failed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "local" => Some(SyncState::Local),
            "pending" => Some(SyncState::Pending),
            "synced" => Some(SyncState::Synced),
            "failed" => Some(SyncState::Failed),
            _ => None,
        }
    }

    /// One-character marker used by `list`.
    pub fn marker(&self) -> &'static str {
        match self {
            SyncState::Local => "·",
            SyncState::Pending => "…",
            SyncState::Synced => "✓",
            SyncState::Failed => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_sheet_labels_are_understood() {
        assert_eq!(Category::from_label("Criança"), Some(Category::Child));
        assert_eq!(Category::from_label("cortesia"), Some(Category::Courtesy));
        assert_eq!(PaymentStatus::from_label("Pagante"), Some(PaymentStatus::Paying));
        assert_eq!(PaymentStatus::from_label("Isento"), Some(PaymentStatus::Exempt));
        assert_eq!(Category::from_label("vip"), None);
    }

    #[test]
    fn sync_state_db_strings() {
        for s in [
            SyncState::Local,
            SyncState::Pending,
            SyncState::Synced,
            SyncState::Failed,
        ] {
            assert_eq!(SyncState::from_db_str(s.to_db_str()), Some(s));
        }
    }
}
