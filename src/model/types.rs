use std::fmt;

/// The kind of energy a reading or meter belongs to.
///
/// Selects the meter identifiers, the API resource path, and the store
/// partition a reading is filed under.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EnergyType {
    Electricity,
    Gas,
}

impl EnergyType {
    /// All energy types, in the fixed order a sync processes them.
    pub const ALL: [EnergyType; 2] = [EnergyType::Electricity, EnergyType::Gas];
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnergyType::Electricity => write!(f, "electricity"),
            EnergyType::Gas => write!(f, "gas"),
        }
    }
}
