pub mod master_key;
