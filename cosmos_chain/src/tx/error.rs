use flex_error::define_error;

define_error! {
    TxError {
        MessageExceedsMaxTxSize
            { size: usize, max: usize }
            |e| { format!("a single message of {} bytes exceeds the max tx size {}", e.size, e.max) },
        BroadcastTimedOut
            { hash: String }
            |e| { format!("timed out waiting for tx {} to be committed", e.hash) },
    }
}
