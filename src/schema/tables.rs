/// A table created with `CREATE TABLE IF NOT EXISTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    /// Column list and table constraints, without the surrounding parentheses.
    pub definition: &'static str,
}

impl TableSpec {
    #[must_use]
    pub fn create_sql(&self) -> String {
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, self.definition)
    }
}

/// An index created with `CREATE INDEX IF NOT EXISTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static str,
}

impl IndexSpec {
    #[must_use]
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            self.name, self.table, self.columns
        )
    }
}

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "artists",
        definition: "ArtistID TEXT UNIQUE, ArtistName TEXT, ArtistSortName TEXT, DateAdded TEXT, \
                     Status TEXT, IncludeExtras INTEGER, LatestAlbum TEXT, ReleaseDate TEXT, \
                     AlbumID TEXT, HaveTracks INTEGER, TotalTracks INTEGER, LastUpdated TEXT, \
                     ArtworkURL TEXT, ThumbURL TEXT, Extras TEXT",
    },
    // ReleaseFormat is the medium (CD, Digital, Vinyl). For the hybrid release
    // ReleaseID equals AlbumID, which is the release group id.
    TableSpec {
        name: "albums",
        definition: "ArtistID TEXT, ArtistName TEXT, AlbumTitle TEXT, AlbumASIN TEXT, \
                     ReleaseDate TEXT, DateAdded TEXT, AlbumID TEXT UNIQUE, Status TEXT, \
                     Type TEXT, ArtworkURL TEXT, ThumbURL TEXT, ReleaseID TEXT, \
                     ReleaseCountry TEXT, ReleaseFormat TEXT",
    },
    // Format is the file format (mp3, flac).
    TableSpec {
        name: "tracks",
        definition: "ArtistID TEXT, ArtistName TEXT, AlbumTitle TEXT, AlbumASIN TEXT, \
                     AlbumID TEXT, TrackTitle TEXT, TrackDuration, TrackID TEXT, \
                     TrackNumber INTEGER, Location TEXT, BitRate INTEGER, CleanName TEXT, \
                     Format TEXT, ReleaseID TEXT",
    },
    TableSpec {
        name: "allalbums",
        definition: "ArtistID TEXT, ArtistName TEXT, AlbumTitle TEXT, AlbumASIN TEXT, \
                     ReleaseDate TEXT, AlbumID TEXT, Type TEXT, ReleaseID TEXT, \
                     ReleaseCountry TEXT, ReleaseFormat TEXT",
    },
    TableSpec {
        name: "alltracks",
        definition: "ArtistID TEXT, ArtistName TEXT, AlbumTitle TEXT, AlbumASIN TEXT, \
                     AlbumID TEXT, TrackTitle TEXT, TrackDuration, TrackID TEXT, \
                     TrackNumber INTEGER, Location TEXT, BitRate INTEGER, CleanName TEXT, \
                     Format TEXT, ReleaseID TEXT",
    },
    TableSpec {
        name: "snatched",
        definition: "AlbumID TEXT, Title TEXT, Size INTEGER, URL TEXT, DateAdded TEXT, \
                     Status TEXT, FolderName TEXT",
    },
    // Matched is scratch state used while matching local files against alltracks.
    TableSpec {
        name: "have",
        definition: "ArtistName TEXT, AlbumTitle TEXT, TrackNumber TEXT, TrackTitle TEXT, \
                     TrackLength TEXT, BitRate TEXT, Genre TEXT, Date TEXT, TrackID TEXT, \
                     Location TEXT, CleanName TEXT, Format TEXT, Matched TEXT",
    },
    TableSpec {
        name: "lastfmcloud",
        definition: "ArtistName TEXT, ArtistID TEXT, Count INTEGER",
    },
    TableSpec {
        name: "descriptions",
        definition: "ArtistID TEXT, ReleaseGroupID TEXT, ReleaseID TEXT, Summary TEXT, \
                     Content TEXT, LastUpdated TEXT",
    },
    TableSpec {
        name: "blacklist",
        definition: "ArtistID TEXT UNIQUE",
    },
    TableSpec {
        name: "newartists",
        definition: "ArtistName TEXT UNIQUE",
    },
    TableSpec {
        name: "releases",
        definition: "ReleaseID TEXT, ReleaseGroupID TEXT, UNIQUE(ReleaseID, ReleaseGroupID)",
    },
];

pub const INDEXES: &[IndexSpec] = &[
    IndexSpec {
        name: "tracks_albumid",
        table: "tracks",
        columns: "AlbumID ASC",
    },
    IndexSpec {
        name: "album_artistid_reldate",
        table: "albums",
        columns: "ArtistID ASC, ReleaseDate DESC",
    },
];
