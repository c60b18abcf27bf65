/// Multi-value `Extras` setting given to artists that had `IncludeExtras` switched on.
pub const EXTRAS_SENTINEL: &str = "1,2,3,4,5,6,7,8";

/// Data fix-up that runs only in the migration that adds its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backfill {
    /// Copy truthy `artists.IncludeExtras` flags into `Extras` as [`EXTRAS_SENTINEL`].
    ExtrasFromIncludeExtras,
}

/// A column that older store files may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub table: &'static str,
    pub column: &'static str,
    pub sql_type: &'static str,
    /// SQL literal used as `DEFAULT`, if any.
    pub default: Option<&'static str>,
    pub backfill: Option<Backfill>,
}

impl ColumnSpec {
    const fn new(table: &'static str, column: &'static str, sql_type: &'static str) -> Self {
        Self {
            table,
            column,
            sql_type,
            default: None,
            backfill: None,
        }
    }

    const fn default_to(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    const fn backfill(mut self, backfill: Backfill) -> Self {
        self.backfill = Some(backfill);
        self
    }

    #[must_use]
    pub fn alter_sql(&self) -> String {
        match self.default {
            Some(default) => format!(
                "ALTER TABLE {} ADD COLUMN {} {} DEFAULT {default}",
                self.table, self.column, self.sql_type
            ),
            None => format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                self.table, self.column, self.sql_type
            ),
        }
    }
}

pub const COLUMN_SPECS: &[ColumnSpec] = &[
    ColumnSpec::new("artists", "IncludeExtras", "INTEGER").default_to("0"),
    ColumnSpec::new("artists", "LatestAlbum", "TEXT"),
    ColumnSpec::new("artists", "ReleaseDate", "TEXT"),
    ColumnSpec::new("artists", "AlbumID", "TEXT"),
    ColumnSpec::new("artists", "HaveTracks", "INTEGER").default_to("0"),
    ColumnSpec::new("artists", "TotalTracks", "INTEGER").default_to("0"),
    ColumnSpec::new("albums", "Type", "TEXT").default_to("'Album'"),
    ColumnSpec::new("tracks", "TrackNumber", "INTEGER"),
    ColumnSpec::new("snatched", "FolderName", "TEXT"),
    ColumnSpec::new("tracks", "Location", "TEXT"),
    ColumnSpec::new("have", "Location", "TEXT"),
    ColumnSpec::new("tracks", "BitRate", "INTEGER"),
    ColumnSpec::new("tracks", "CleanName", "TEXT"),
    ColumnSpec::new("have", "CleanName", "TEXT"),
    ColumnSpec::new("have", "Format", "TEXT").default_to("NULL"),
    ColumnSpec::new("tracks", "Format", "TEXT").default_to("NULL"),
    ColumnSpec::new("artists", "LastUpdated", "TEXT").default_to("NULL"),
    ColumnSpec::new("artists", "ArtworkURL", "TEXT").default_to("NULL"),
    ColumnSpec::new("albums", "ArtworkURL", "TEXT").default_to("NULL"),
    ColumnSpec::new("artists", "ThumbURL", "TEXT").default_to("NULL"),
    ColumnSpec::new("albums", "ThumbURL", "TEXT").default_to("NULL"),
    ColumnSpec::new("descriptions", "ArtistID", "TEXT").default_to("NULL"),
    ColumnSpec::new("descriptions", "LastUpdated", "TEXT").default_to("NULL"),
    ColumnSpec::new("albums", "ReleaseID", "TEXT").default_to("NULL"),
    ColumnSpec::new("albums", "ReleaseFormat", "TEXT").default_to("NULL"),
    ColumnSpec::new("albums", "ReleaseCountry", "TEXT").default_to("NULL"),
    ColumnSpec::new("tracks", "ReleaseID", "TEXT").default_to("NULL"),
    ColumnSpec::new("have", "Matched", "TEXT").default_to("NULL"),
    ColumnSpec::new("artists", "Extras", "TEXT")
        .default_to("NULL")
        .backfill(Backfill::ExtrasFromIncludeExtras),
];
