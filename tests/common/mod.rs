#![allow(dead_code)]

use broadside::{
    Coord, Fleet, Match, MatchId, MemoryStore, Orientation, PlayerId, PlayerSlot, RoomCodeGenerator,
    SessionCoordinator, ShipPlacement,
};

/// Ships stacked on even rows from the left edge:
/// carrier y=0, battleship y=2, cruiser y=4, submarine y=6, destroyer y=8.
pub fn standard_fleet() -> Fleet {
    let rows = [
        ("carrier", 5, 0),
        ("battleship", 4, 2),
        ("cruiser", 3, 4),
        ("submarine", 3, 6),
        ("destroyer", 2, 8),
    ];
    Fleet::new(
        rows.iter()
            .map(|(id, len, y)| {
                ShipPlacement::line(*id, Coord::new(0, *y), *len, Orientation::Horizontal).unwrap()
            })
            .collect(),
    )
}

/// Every cell occupied by [`standard_fleet`].
pub fn standard_fleet_cells() -> Vec<Coord> {
    standard_fleet()
        .ships()
        .iter()
        .flat_map(|s| s.cells.clone())
        .collect()
}

/// Cells that never hold a ship in [`standard_fleet`] (odd rows), in
/// row-major order.
pub fn water_cells() -> Vec<Coord> {
    (0..10u8)
        .filter(|y| y % 2 == 1)
        .flat_map(|y| (0..10u8).map(move |x| Coord::new(x, y)))
        .collect()
}

pub fn alice() -> PlayerId {
    PlayerId::from("alice")
}

pub fn bob() -> PlayerId {
    PlayerId::from("bob")
}

/// A pure match already in `Playing`, both sides on the standard fleet.
pub fn playing_match() -> Match {
    let mut m = Match::new(MatchId(1), "ROOM01", alice());
    m.join(&bob()).unwrap();
    m.place_fleet(PlayerSlot::A, standard_fleet()).unwrap();
    m.place_fleet(PlayerSlot::B, standard_fleet()).unwrap();
    m
}

pub fn coordinator() -> SessionCoordinator<MemoryStore> {
    SessionCoordinator::new(MemoryStore::new()).with_room_codes(RoomCodeGenerator::seeded(7))
}

/// Create, join and place both standard fleets through the coordinator.
pub async fn playing_session(coordinator: &SessionCoordinator<MemoryStore>) -> MatchId {
    let (id, _) = coordinator.create_match(&alice()).await.unwrap();
    coordinator.join_match(&id.into(), &bob()).await.unwrap();
    coordinator.place_fleet(id, &alice(), standard_fleet()).await.unwrap();
    coordinator.place_fleet(id, &bob(), standard_fleet()).await.unwrap();
    id
}
