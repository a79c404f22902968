/// File names of the tables that make up a network snapshot.
pub struct Config {
    pub stations_file_name: String,
    pub lines_file_name: String,
    pub sections_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations_file_name: "stations.txt".into(),
            lines_file_name: "lines.txt".into(),
            sections_file_name: "sections.txt".into(),
        }
    }
}
