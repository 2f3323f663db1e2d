//! End-to-end checks that drive the pipeline from artifacts written to disk.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod decision_threshold;
#[cfg(test)]
mod encoder_pairing;
#[cfg(test)]
mod load_failures;
