/// Module for stacked LSTM networks.
pub mod lstm_network;

/// Module for the embedding + recurrent + dense sentiment classifier.
pub mod sentiment;
