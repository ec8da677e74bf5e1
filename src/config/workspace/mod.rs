pub mod file_paths;
