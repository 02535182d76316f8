use serde::{Deserialize, Serialize};

/// The five focus categories. Closed set; the integer discriminant is the
/// stable identity used in storage and over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum FocusCategory {
    Creativity = 0,
    Fitness = 1,
    Relationships = 2,
    Entertainment = 3,
    Balance = 4,
}

impl FocusCategory {
    pub const ALL: [FocusCategory; 5] = [
        FocusCategory::Creativity,
        FocusCategory::Fitness,
        FocusCategory::Relationships,
        FocusCategory::Entertainment,
        FocusCategory::Balance,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    /// Built-in label, used when the user has not renamed the category.
    pub fn default_label(self) -> &'static str {
        match self {
            FocusCategory::Creativity => "Creativity",
            FocusCategory::Fitness => "Fitness",
            FocusCategory::Relationships => "Relationships",
            FocusCategory::Entertainment => "Entertainment",
            FocusCategory::Balance => "Balance",
        }
    }

    /// Accent color, from the macOS tag palette.
    pub fn color(self) -> &'static str {
        match self {
            FocusCategory::Creativity => "#007AFF",
            FocusCategory::Fitness => "#34C759",
            FocusCategory::Relationships => "#FF3B30",
            FocusCategory::Entertainment => "#FF9500",
            FocusCategory::Balance => "#AF52DE",
        }
    }
}

impl From<FocusCategory> for i32 {
    fn from(c: FocusCategory) -> i32 {
        c as i32
    }
}

impl TryFrom<i32> for FocusCategory {
    type Error = String;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(FocusCategory::Creativity),
            1 => Ok(FocusCategory::Fitness),
            2 => Ok(FocusCategory::Relationships),
            3 => Ok(FocusCategory::Entertainment),
            4 => Ok(FocusCategory::Balance),
            other => Err(format!("unknown focus category id: {other}")),
        }
    }
}

/// One focus category as presented to clients, with any label override applied.
#[derive(Debug, Serialize)]
pub struct FocusLabelEntry {
    pub id: FocusCategory,
    pub label: String,
    pub default_label: &'static str,
    pub color: &'static str,
    pub is_custom: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetFocusLabelRequest {
    pub label: String,
}
