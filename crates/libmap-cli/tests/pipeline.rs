//! End-to-end runs over small on-disk extracts.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use libmap_cli::config::{ConfigOverrides, FileConfig, RunConfig};
use libmap_cli::pipeline::{LinkageSummary, run_pipeline};
use libmap_model::GeoLevel;
use libmap_output::{ColumnMap, OutputTable, default_column_map};

const SURVEY: &str = "LIBID,LIBNAME,ZIP,POPU_LSA,LOCALE_ADD,VISITS,TOTPRO,TOTATTEN,PITUSR,WIFISESS,TOTINCM,INCITSST,INCITSCO,LATITUDE,LONGITUD\n\
CA0001,Alameda Free Library,94501,1000,11,5000,10,200,100,300,50000,06,001,37.77,-122.27\n\
CA0002,Modoc County Library,96101,500,42,1000,5,50,20,10,1000,06,049,41.49,-120.54\n\
NY0003,Far Library,10001,200,32,M,0,0,0,0,0,36,061,,\n";

const INCOME_COUNTY: &str = "GEO_ID,NAME,B19013_001E,B19013_001M\n\
Geography,Geographic Area Name,Estimate,Margin\n\
0500000US06001,\"Alameda County, California\",112017,1200\n";

const INCOME_ZIP: &str = "GEO_ID,NAME,B19013_001E,B19013_001M\n\
Geography,Geographic Area Name,Estimate,Margin\n\
860Z200US96101,ZCTA5 96101,\"41,250\",**\n";

const RACE: &str = "GEO_ID,NAME,B02001_001E,B02001_002E,B02001_003E,B02001_004E,B02001_005E,B02001_006E,B02001_007E\n\
Geography,Name,Total,White,Black,AIAN,Asian,NHPI,Other\n\
0500000US06001,\"Alameda County, California\",10,6,2,1,1,0,0\n\
860Z200US96101,ZCTA5 96101,5,5,0,0,0,0,0\n";

const ETHNICITY: &str = "GEO_ID,NAME,B03003_001E,B03003_002E,B03003_003E\n\
Geography,Name,Total,Not Hispanic,Hispanic\n\
0500000US06001,\"Alameda County, California\",10,5,5\n\
860Z200US96101,ZCTA5 96101,5,5,0\n";

const ELECTION: &str = "year,state,county_name,county_fips,office,candidate,party,candidatevotes,totalvotes,version,mode\n\
2020,CALIFORNIA,ALAMEDA,6001,US PRESIDENT,A,DEMOCRAT,600,1000,1,TOTAL\n\
2020,CALIFORNIA,ALAMEDA,6001,US PRESIDENT,B,REPUBLICAN,400,1000,1,TOTAL\n\
2020,CALIFORNIA,MODOC,6049,US PRESIDENT,A,DEMOCRAT,1000,4000,1,TOTAL\n\
2020,CALIFORNIA,MODOC,6049,US PRESIDENT,B,REPUBLICAN,3000,4000,1,TOTAL\n\
2016,CALIFORNIA,MODOC,6049,US PRESIDENT,B,REPUBLICAN,9,9,1,TOTAL\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn overrides(dir: &Path) -> ConfigOverrides {
    ConfigOverrides {
        library: Some(write(dir, "pls.csv", SURVEY)),
        income: vec![
            write(dir, "income_county.csv", INCOME_COUNTY),
            write(dir, "income_zip.csv", INCOME_ZIP),
        ],
        race: vec![write(dir, "race.csv", RACE)],
        ethnicity: vec![write(dir, "ethnicity.csv", ETHNICITY)],
        election: Some(write(dir, "countypres.csv", ELECTION)),
        year: Some(2020),
        output: Some(dir.join("public").join("libraries.json")),
        ..ConfigOverrides::default()
    }
}

fn column(table: &OutputTable, name: &str) -> Vec<Value> {
    let idx = table
        .cols
        .iter()
        .position(|col| col == name)
        .unwrap_or_else(|| panic!("no output column {name}"));
    table.rows.iter().map(|row| row[idx].clone()).collect()
}

#[test]
fn build_links_each_library_and_writes_json() {
    let dir = TempDir::new().unwrap();
    let config = RunConfig::resolve(FileConfig::default(), overrides(dir.path())).unwrap();

    let output = run_pipeline(&config, false).unwrap();

    let written = std::fs::read_to_string(dir.path().join("public").join("libraries.json")).unwrap();
    let table: OutputTable = serde_json::from_str(&written).unwrap();
    assert_eq!(table, output.table);
    assert_eq!(table.cols, default_column_map().output_names());
    assert!(table.rows.iter().all(|row| row.len() == table.cols.len()));

    assert_eq!(column(&table, "id"), vec![json!("CA0001"), json!("CA0002"), json!("NY0003")]);
    assert_eq!(column(&table, "income"), vec![json!(112017), json!(41250), json!(-1)]);
    assert_eq!(
        column(&table, "demographic_geography"),
        vec![json!("county"), json!("zip"), json!("none")]
    );
    assert_eq!(column(&table, "perc_white"), vec![json!(60.0), json!(100.0), json!(-1)]);
    assert_eq!(column(&table, "perc_poc"), vec![json!(40.0), json!(0.0), json!(-1)]);
    assert_eq!(column(&table, "perc_hispanic"), vec![json!(50.0), json!(0.0), json!(-1)]);
    assert_eq!(
        column(&table, "perc_poc_or_hispanic"),
        vec![json!(50.0), json!(0.0), json!(-1)]
    );
    assert_eq!(
        column(&table, "census_area"),
        vec![json!("Alameda County, California"), json!("ZCTA5 96101"), json!(-1)]
    );

    // No age extracts were given.
    assert_eq!(column(&table, "median_age"), vec![json!(""), json!(""), json!("")]);

    assert_eq!(column(&table, "visits_per_capita"), vec![json!(5.0), json!(2.0), json!(0.0)]);
    assert_eq!(column(&table, "visits_per_capita_norm"), vec![json!(3), json!(2), json!(1)]);
    assert_eq!(column(&table, "attendance_per_program"), vec![json!(20.0), json!(10.0), json!(0.0)]);

    assert_eq!(column(&table, "total_votes"), vec![json!(1000), json!(4000), json!(-1)]);
    assert_eq!(column(&table, "vote_points"), vec![json!(-20.0), json!(50.0), json!(-1)]);

    let geo_urls = column(&table, "geo_url");
    assert_eq!(
        geo_urls[0],
        json!("https://www.openstreetmap.org/?mlat=37.77&mlon=-122.27&zoom=12")
    );
    assert_eq!(geo_urls[2], json!(-1));

    let summary = output.summary;
    assert_eq!(summary.libraries, 3);
    assert_eq!(summary.fine_geography, GeoLevel::County);
    assert_eq!(
        summary.linkage,
        LinkageSummary {
            fine: 1,
            zip: 1,
            unmatched: 1
        }
    );
    assert_eq!(summary.election_counties, Some(2));
    assert_eq!(summary.election_matched, Some(2));
    assert_eq!(summary.columns, table.cols.len());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = RunConfig::resolve(FileConfig::default(), overrides(dir.path())).unwrap();

    let output = run_pipeline(&config, true).unwrap();

    assert_eq!(output.table.rows.len(), 3);
    assert_eq!(output.summary.output, None);
    assert!(!dir.path().join("public").exists());
}

#[test]
fn run_without_election_has_no_vote_values() {
    let dir = TempDir::new().unwrap();
    let mut overrides = overrides(dir.path());
    overrides.election = None;
    let mut config = RunConfig::resolve(FileConfig::default(), overrides).unwrap();
    config.columns = ColumnMap::new()
        .with("LIBID", "id")
        .with("VOTE_POINTS", "vote_points");

    let output = run_pipeline(&config, true).unwrap();

    assert_eq!(output.table.cols, vec!["id", "vote_points"]);
    assert_eq!(column(&output.table, "vote_points"), vec![json!(""), json!(""), json!("")]);
    assert_eq!(output.summary.election_counties, None);
}

#[test]
fn missing_extract_names_the_source() {
    let dir = TempDir::new().unwrap();
    let mut config = RunConfig::resolve(FileConfig::default(), overrides(dir.path())).unwrap();
    config.race = vec![dir.path().join("absent_race.csv")];

    let err = run_pipeline(&config, true).unwrap_err();

    assert!(format!("{err:#}").contains("load race extract"));
}
