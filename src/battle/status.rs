/// persistent ailments a unit can be under. encoded into state keys as a
/// small integer, 0 meaning healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
    Toxic,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Burn => 1,
            Status::Freeze => 2,
            Status::Paralysis => 3,
            Status::Poison => 4,
            Status::Sleep => 5,
            Status::Toxic => 6,
        }
    }
}

/// 0 for a healthy or absent unit
pub fn code_of(status: Option<Status>) -> u8 {
    status.map(Status::code).unwrap_or(0)
}
