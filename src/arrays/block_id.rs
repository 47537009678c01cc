use strum_macros::{Display, EnumIter};

//=====================================================================
// Enum of all data blocks in continuous energy neutron ACE tables.
// Each block has a fixed slot in the JXS array which holds its
// (1-based) starting location in the XSS array.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
pub enum BlockId {
    ESZ,    // Energy table
    NU,     // Fission nu data
    MTR,    // MT array
    LQR,    // Q-value array
    TYR,    // Reaction type array
    LSIG,   // Table of cross section locators
    SIG,    // Cross sections
    LAND,   // Table of angular distribution locators
    AND,    // Angular distributions
    LDLW,   // Table of energy distribution locators
    DLW,    // Energy distributions
    GPD,    // Photon production data
    MTRP,   // Photon production MT array
    LSIGP,  // Table of photon production cross section locators
    SIGP,   // Photon production cross sections
    LANDP,  // Table of photon production angular distribution locators
    ANDP,   // Photon production angular distributions
    LDLWP,  // Table of photon production energy distribution locators
    DLWP,   // Photon production energy distributions
    YP,     // Table of yield multipliers
    FIS,    // Total fission cross section
    END,    // Last word of the conventional table
    LUNR,   // Unresolved resonance probability tables
    DNU,    // Delayed nu-bar data
    BDD,    // Basic delayed neutron precursor data
    DNEDL,  // Table of delayed neutron energy distribution locators
    DNED,   // Delayed neutron energy distributions
    PTYPE,  // Particle type array
    NTRO,   // Array containing number of particle production reactions
    NEXT,   // Table of particle production locators
}

impl BlockId {
    // For a given BlockId, return the index in the JXS array which lists
    // its starting index in the main XSS array.
    #[inline]
    pub fn jxs_index(&self) -> usize {
        match self {
            BlockId::ESZ =>  0,
            BlockId::NU =>  1,
            BlockId::MTR =>  2,
            BlockId::LQR =>  3,
            BlockId::TYR =>  4,
            BlockId::LSIG =>  5,
            BlockId::SIG =>  6,
            BlockId::LAND =>  7,
            BlockId::AND =>  8,
            BlockId::LDLW =>  9,
            BlockId::DLW => 10,
            BlockId::GPD => 11,
            BlockId::MTRP => 12,
            BlockId::LSIGP => 13,
            BlockId::SIGP => 14,
            BlockId::LANDP => 15,
            BlockId::ANDP => 16,
            BlockId::LDLWP => 17,
            BlockId::DLWP => 18,
            BlockId::YP => 19,
            BlockId::FIS => 20,
            BlockId::END => 21,
            BlockId::LUNR => 22,
            BlockId::DNU => 23,
            BlockId::BDD => 24,
            BlockId::DNEDL => 25,
            BlockId::DNED => 26,
            BlockId::PTYPE => 29,
            BlockId::NTRO => 30,
            BlockId::NEXT => 31,
        }
    }
}
