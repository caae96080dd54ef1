//! Column names.
//!
//! Source columns keep the publisher's field codes (treated as opaque keys).
//! Derived columns are upper snake case and are only ever added, never
//! overwritten in place.

/// Public Libraries Survey administrative-entity file.
pub mod library {
    pub const ID: &str = "LIBID";
    pub const NAME: &str = "LIBNAME";
    pub const ADDRESS: &str = "ADDRESS";
    pub const CITY: &str = "CITY";
    pub const ZIP: &str = "ZIP";
    pub const STATE: &str = "STABR";
    pub const RELATIONSHIP: &str = "C_RELATN";
    pub const GEOCODE: &str = "GEOCODE";
    pub const POPULATION: &str = "POPU_LSA";
    pub const BRANCHES: &str = "BRANLIB";
    pub const LIBRARIANS: &str = "LIBRARIA";
    pub const STAFF: &str = "TOTSTAFF";
    pub const OP_REVENUE: &str = "TOTINCM";
    pub const CAP_REVENUE: &str = "CAP_REV";
    pub const PHYSICAL_ITEMS: &str = "TOTPHYS";
    pub const E_ITEMS: &str = "ELECCOLL";
    pub const VISITS: &str = "VISITS";
    pub const PROGRAMS: &str = "TOTPRO";
    pub const ONSITE_PROGRAMS: &str = "ONPRO";
    pub const VIRTUAL_PROGRAMS: &str = "VIRPRO";
    pub const ATTENDANCE: &str = "TOTATTEN";
    pub const ONSITE_ATTENDANCE: &str = "ONATTEN";
    pub const VIRTUAL_ATTENDANCE: &str = "VIRATTEN";
    pub const COMPUTER_SESSIONS: &str = "PITUSR";
    pub const WIFI_SESSIONS: &str = "WIFISESS";
    pub const REGION: &str = "OBEREG";
    pub const LONGITUDE: &str = "LONGITUD";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LOCALE: &str = "LOCALE_ADD";
    pub const DISTRICT: &str = "CDCODE";
    pub const TRACT: &str = "CENTRACT";
    pub const STATE_FIPS: &str = "INCITSST";
    pub const COUNTY_FIPS: &str = "INCITSCO";

    /// Activity and resource counts, coerced with a `-1` default.
    pub const COUNT_FIELDS: &[&str] = &[
        POPULATION,
        BRANCHES,
        LIBRARIANS,
        STAFF,
        OP_REVENUE,
        CAP_REVENUE,
        PHYSICAL_ITEMS,
        E_ITEMS,
        VISITS,
        PROGRAMS,
        ONSITE_PROGRAMS,
        VIRTUAL_PROGRAMS,
        ATTENDANCE,
        ONSITE_ATTENDANCE,
        VIRTUAL_ATTENDANCE,
        COMPUTER_SESSIONS,
        WIFI_SESSIONS,
        REGION,
        LOCALE,
    ];

    pub const COORDINATE_FIELDS: &[&str] = &[LONGITUDE, LATITUDE];

    pub const REQUIRED: &[&str] = &[ID, NAME, ZIP, POPULATION, LOCALE];
}

/// ACS 5-year Census extracts.
pub mod census {
    /// Canonical geographic identifier column present in every extract.
    pub const GEO_ID: &str = "GEO_ID";
    /// Area name, e.g. `Census Tract 4001; Alameda County; California`.
    pub const NAME: &str = "NAME";

    /// B19013: median household income.
    pub const MEDIAN_INCOME_RAW: &str = "B19013_001E";

    /// B02001: race.
    pub const RACE_WHITE: &str = "B02001_002E";
    pub const RACE_BLACK: &str = "B02001_003E";
    pub const RACE_INDIGENOUS: &str = "B02001_004E";
    pub const RACE_ASIAN: &str = "B02001_005E";
    pub const RACE_PACIFIC: &str = "B02001_006E";
    pub const RACE_OTHER: &str = "B02001_007E";

    pub const RACE_FIELDS: [&str; 6] = [
        RACE_WHITE,
        RACE_BLACK,
        RACE_INDIGENOUS,
        RACE_ASIAN,
        RACE_PACIFIC,
        RACE_OTHER,
    ];

    /// B03003: Hispanic or Latino origin.
    pub const NOT_HISPANIC: &str = "B03003_002E";
    pub const HISPANIC: &str = "B03003_003E";

    pub const ETHNICITY_FIELDS: [&str; 2] = [NOT_HISPANIC, HISPANIC];

    /// S0101: age and sex.
    pub const AGE_UNDER_18: &str = "S0101_C02_022E";
    pub const AGE_65_PLUS: &str = "S0101_C02_030E";
    pub const MEDIAN_AGE: &str = "S0101_C01_032E";

    pub const AGE_FIELDS: [&str; 3] = [AGE_UNDER_18, AGE_65_PLUS, MEDIAN_AGE];
}

/// County presidential returns, one row per candidate per reporting mode.
pub mod election {
    pub const YEAR: &str = "year";
    pub const COUNTY_FIPS: &str = "county_fips";
    pub const PARTY: &str = "party";
    pub const CANDIDATE_VOTES: &str = "candidatevotes";
    pub const MODE: &str = "mode";

    pub const REQUIRED: &[&str] = &[YEAR, COUNTY_FIPS, PARTY, CANDIDATE_VOTES];

    pub const PARTY_DEMOCRAT: &str = "DEMOCRAT";
    pub const PARTY_REPUBLICAN: &str = "REPUBLICAN";
    pub const MODE_TOTAL: &str = "TOTAL";
}

/// Columns added by the pipeline.
pub mod derived {
    pub const TRACT_GEO_ID: &str = "TRACT_GEO_ID";
    pub const COUNTY_GEO_ID: &str = "COUNTY_GEO_ID";
    pub const ZIP_GEO_ID: &str = "ZIP_GEO_ID";
    pub const GEO_URL: &str = "GEO_URL";
    pub const DEMO_GEO_LEVEL: &str = "DEMO_GEO_LEVEL";

    pub const MEDIAN_INCOME: &str = "MEDIAN_INCOME";
    pub const AREA_DESCRIPTION: &str = "AREA_DESCRIPTION";
    pub const RACES_TOTAL: &str = "RACES_TOTAL";
    pub const PERC_WHITE: &str = "PERC_WHITE";
    pub const PERC_BLACK: &str = "PERC_BLACK";
    pub const PERC_INDIGENOUS: &str = "PERC_INDIGENOUS";
    pub const PERC_ASIAN_PACIFIC: &str = "PERC_ASIAN_PACIFIC";
    pub const PERC_POC: &str = "PERC_POC";
    pub const PERC_HISPANIC: &str = "PERC_HISPANIC";
    pub const PERC_POC_OR_HISPANIC: &str = "PERC_POC_OR_HISPANIC";

    pub const VISITS_PER: &str = "VISITS_PER";
    pub const PRO_PER: &str = "PRO_PER";
    pub const ATTEN_PER: &str = "ATTEN_PER";
    pub const COMP_PER: &str = "COMP_PER";
    pub const WIFI_PER: &str = "WIFI_PER";
    pub const INCM_PER: &str = "INCM_PER";
    pub const VISITS_PER_N: &str = "VISITS_PER_N";
    pub const PRO_PER_N: &str = "PRO_PER_N";
    pub const ATTEN_PER_N: &str = "ATTEN_PER_N";
    pub const COMP_PER_N: &str = "COMP_PER_N";
    pub const WIFI_PER_N: &str = "WIFI_PER_N";

    pub const TOTAL_VOTES: &str = "TOTAL_VOTES";
    pub const DEM_VOTES: &str = "DEM_VOTES";
    pub const REP_VOTES: &str = "REP_VOTES";
    pub const VOTE_POINTS: &str = "VOTE_POINTS";
}
