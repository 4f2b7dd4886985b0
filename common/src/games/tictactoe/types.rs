use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

pub type CellValue = Option<Player>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Placement,
    Movement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Multiplayer,
    Singleplayer,
}

/// One live piece. `move_number` names the piece for its whole life; only
/// `position` changes when it is relocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub player: Player,
    pub position: usize,
    pub move_number: usize,
}

impl Move {
    pub fn new(player: Player, position: usize, move_number: usize) -> Self {
        Self {
            player,
            position,
            move_number,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerPlayer<T> {
    pub x: T,
    pub o: T,
}

impl<T> PerPlayer<T> {
    pub fn new(x: T, o: T) -> Self {
        Self { x, o }
    }

    pub fn get(&self, player: Player) -> &T {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    pub fn get_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        self.get_mut(player)
    }
}

pub type Scores = PerPlayer<u32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub kind: LineKind,
    pub cells: Vec<usize>,
}

impl WinningLine {
    pub fn new(player: Player, kind: LineKind, cells: Vec<usize>) -> Self {
        Self {
            player,
            kind,
            cells,
        }
    }
}
