//! Random fleets and random play, for simulations and tests.

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::core::{
    AttackKind, Coord, Fleet, FleetError, Grid, MatchId, MatchStatus, Orientation, PlayerId, ShipPlacement,
    BOARD_SIZE, FLEET,
};
use crate::error::GameError;
use crate::session::{MatchRef, MatchStore, SessionCoordinator};

const PLACEMENT_ATTEMPTS: usize = 100;

/// A valid fleet with every ship placed at random, named after the
/// standard fleet table.
pub fn random_fleet<R: Rng>(rng: &mut R) -> Result<Fleet, FleetError> {
    let mut occupied = Grid::new();
    let mut ships = Vec::with_capacity(FLEET.len());
    for def in FLEET.iter() {
        let ship = random_ship(rng, def.name(), def.length(), &occupied)?;
        occupied |= ship.mask()?;
        ships.push(ship);
    }
    Ok(Fleet::new(ships))
}

fn random_ship<R: Rng>(rng: &mut R, id: &str, length: usize, occupied: &Grid) -> Result<ShipPlacement, FleetError> {
    let size = BOARD_SIZE as usize;
    for _ in 0..PLACEMENT_ATTEMPTS {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_x, max_y) = match orient {
            Orientation::Horizontal => (size - length, size - 1),
            Orientation::Vertical => (size - 1, size - length),
        };
        let origin = Coord::new(
            rng.random_range(0..=max_x) as u8,
            rng.random_range(0..=max_y) as u8,
        );
        let ship = ShipPlacement::line(id, origin, length, orient)?;
        if (*occupied & ship.mask()?).is_empty() {
            return Ok(ship);
        }
    }
    Err(FleetError::UnableToPlace(id.to_owned()))
}

/// A uniformly random cell not yet in `attacked`.
pub fn random_target<R: Rng>(rng: &mut R, attacked: &Grid) -> Option<Coord> {
    let open: Vec<Coord> = all_cells().filter(|c| !attacked.contains(*c)).collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

/// A random bomb centre whose whole area is still unattacked.
pub fn random_bomb_center<R: Rng>(rng: &mut R, attacked: &Grid) -> Option<Coord> {
    let open: Vec<Coord> = all_cells()
        .filter(|c| {
            AttackKind::Special
                .targets(*c)
                .iter()
                .all(|t| !attacked.contains(*t))
        })
        .collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

fn all_cells() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
}

/// Result of an automated match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub room_code: String,
    pub winner: Option<PlayerId>,
    pub moves: u64,
    pub specials_used: u32,
}

/// Play a whole match between `first` and `second` through the
/// coordinator: create, join by room code, place random fleets, then fire
/// random shots (occasionally a bomb) until someone wins.
pub async fn play_random_match<S: MatchStore, R: Rng + Send>(
    coordinator: &SessionCoordinator<S>,
    rng: &mut R,
    first: &PlayerId,
    second: &PlayerId,
) -> Result<MatchSummary, GameError> {
    let (id, room_code) = coordinator.create_match(first).await?;
    coordinator
        .join_match(&MatchRef::RoomCode(room_code.clone()), second)
        .await?;
    for player in [first, second] {
        let fleet = random_fleet(rng)?;
        coordinator.place_fleet(id, player, fleet).await?;
    }

    let mut specials_used = 0;
    loop {
        let view = coordinator.match_view(id, first).await?;
        if view.status() == MatchStatus::Finished {
            return Ok(MatchSummary {
                match_id: id,
                room_code,
                winner: view.winner_player().cloned(),
                moves: view.moves_made(),
                specials_used,
            });
        }
        let slot = view.current_turn().ok_or(GameError::WrongPhase)?;
        let player = view.player_in(slot).cloned().ok_or(GameError::Forbidden)?;
        let board = view.board(slot);
        let attacked = board.attacked();

        let bomb = if board.special_charges() > 0 && rng.random_bool(0.1) {
            random_bomb_center(rng, &attacked)
        } else {
            None
        };
        let (coord, kind) = match bomb {
            Some(center) => (center, AttackKind::Special),
            None => {
                let target = random_target(rng, &attacked).ok_or(GameError::WrongPhase)?;
                (target, AttackKind::Normal)
            }
        };
        let outcome = coordinator.attack(id, &player, coord, kind).await?;
        if kind == AttackKind::Special {
            specials_used += 1;
        }
        debug!(
            "match {}: {} fired {:?} at {} for {} hit(s)",
            id, player, kind, coord, outcome.hits
        );
    }
}
