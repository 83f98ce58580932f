use std::fmt;

use rust_fsm::state_machine;

state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(WaitingForPlayers)

    WaitingForPlayers => {
        StartGame => Playing
    },
    Playing => {
        Finish => GameOver
    },
    GameOver => {
        StartGame => Playing
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
