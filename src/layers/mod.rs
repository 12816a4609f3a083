/// Single LSTM cell.
pub mod lstm_cell;

/// Bidirectional LSTM stack.
pub mod bilstm_network;

/// Dense output layer.
pub mod linear;

/// Token embedding table.
pub mod embedding;
