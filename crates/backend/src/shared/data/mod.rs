pub mod db;
pub mod references;
