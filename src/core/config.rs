use super::ship::ShipDef;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("carrier", 5),
    ShipDef::new("battleship", 4),
    ShipDef::new("cruiser", 3),
    ShipDef::new("submarine", 3),
    ShipDef::new("destroyer", 2),
];

/// Special (bomb) attacks each player starts a match with.
pub const STARTING_SPECIAL_CHARGES: u8 = 2;

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Ship lengths of the standard fleet, sorted ascending.
pub fn fleet_lengths_sorted() -> [usize; NUM_SHIPS] {
    let mut lens = FLEET.map(|def| def.length());
    lens.sort_unstable();
    lens
}
