pub mod ics07_tendermint;
