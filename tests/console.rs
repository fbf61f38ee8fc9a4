// ============================================================================
// Console sessions: scripted stdin, captured stdout
// ============================================================================

use sales_importer::{Config, ConsoleUi, SalesManager};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const ALL_SALES: &str = "12493.0,2020-12-22,w\n\
                         13761.0,2021-09-15,e\n\
                         9710.0,2021-05-15,e\n\
                         8934.0,2021-08-08,c\n\
                         18340.0,2020-12-22,c\n\
                         12345.0,2020-04-17,m\n\
                         2929.0,2021-04-10,w\n";

fn data_dir() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("all_sales.csv"), ALL_SALES).unwrap();
    fs::write(dir.path().join("imported_files.txt"), "").unwrap();
    dir
}

fn run_session(data_dir: &Path, input: &str) -> String {
    let config = Config {
        data_dir: data_dir.to_path_buf(),
        ..Config::default()
    };
    let manager = SalesManager::new(&config).unwrap();
    let mut console = ConsoleUi::new(manager, Cursor::new(input.as_bytes().to_vec()), Vec::new());

    console.run().unwrap();

    String::from_utf8(console.into_writer()).unwrap()
}

fn assert_steps(stdout: &str, steps: &[&str]) {
    for step in steps {
        assert!(stdout.contains(step), "missing {:?} in:\n{}", step, stdout);
    }
}

#[test]
fn test_view_command() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "view\nexit\n");

    assert_steps(
        &stdout,
        &[
            "     Date           Quarter        Region                  Amount\n\
             -----------------------------------------------------------------\n\
             1.   2020-12-22     4              West                $12,493.00\n\
             2.   2021-09-15     3              East                $13,761.00\n\
             3.   2021-05-15     2              East                 $9,710.00\n\
             4.   2021-08-08     3              Central              $8,934.00\n\
             5.   2020-12-22     4              Central             $18,340.00\n\
             6.   2020-04-17     2              Mountain            $12,345.00\n\
             7.   2021-04-10     2              West                 $2,929.00\n\
             -----------------------------------------------------------------\n",
            "TOTAL                                                  $78,512.00\n",
        ],
    );
    println!("✅ View test PASSED");
}

#[test]
fn test_add1_command() {
    let dir = data_dir();

    let stdout = run_session(
        dir.path(),
        "add1\n0\n3245\n0\n3000\n2021\n0\n20\n2\n0\n40\n14\nx\nc\nexit\n",
    );

    assert_steps(
        &stdout,
        &[
            "Amount:             ",
            "Amount must be greater than zero.\nAmount:             ",
            "Year (2000-2999):   ",
            "Year must be between 2000 and 2999.\nYear (2000-2999):   ",
            "Month (1-12):       ",
            "Month must be between 1 and 12.\nMonth (1-12):       ",
            "Day (1-28):         ",
            "Day must be between 1 and 28.\nDay (1-28):         ",
            "Region ('w', 'm', 'c', 'e'):",
            "Region must be one of the following: ('w', 'm', 'c', 'e').\nRegion ('w', 'm', 'c', 'e'):",
            "Sales for 2021-02-14 is added.\n\n\nPlease enter a command: ",
        ],
    );

    let saved = fs::read_to_string(dir.path().join("all_sales.csv")).unwrap();
    assert!(saved.ends_with("3245,2021-02-14,c\n"));
}

#[test]
fn test_add2_command() {
    let dir = data_dir();

    let stdout = run_session(
        dir.path(),
        "add2\n4324\n0021-08-14\n202a\n2021-8-14\ne\nexit\n",
    );

    assert_steps(
        &stdout,
        &[
            "Amount:             ",
            "Date (yyyy-mm-dd):  ",
            "Year of the date must be between 2000 and 2999.\nDate (yyyy-mm-dd):  ",
            "202a is not in a valid date format.\nDate (yyyy-mm-dd):  ",
            "Region ('w', 'm', 'c', 'e'):",
            "Sales for 2021-08-14 is added.\n",
        ],
    );
}

#[test]
fn test_import_command() {
    let dir = data_dir();
    fs::write(dir.path().join("sales_q2_2021_w.csv"), "").unwrap();
    fs::write(
        dir.path().join("sales_q3_2021_w.csv"),
        "13761,2021-07-15\n9710,2021-07-32\nabc,2021-09-15\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("sales_q4_2021_w.csv"),
        "13761,2021-10-15\n9710,2021-11-15\n8934,2021-12-15\n",
    )
    .unwrap();

    let stdout = run_session(
        dir.path(),
        "import\nregion1\n\
         import\nsales_q1_2021_x.csv\n\
         import\nsales_q1_2021_w.csv\n\
         import\nsales_q2_2021_w.csv\n\
         import\nsales_q3_2021_w.csv\n\
         import\nsales_q4_2021_w.csv\n\
         import\nsales_q4_2021_w.csv\n\
         exit\n",
    );

    assert_steps(
        &stdout,
        &[
            "Enter name of file to import: \
             Filename 'region1' doesn't follow the expected format of 'sales_qn_yyyy_r.csv'.\n\
             \nPlease enter a command: ",
            "Enter name of file to import: \
             Filename 'sales_q1_2021_x.csv' doesn't include one of the following region codes: ['w', 'm', 'c', 'e'].\n\
             \nPlease enter a command: ",
            ". Fail to import sales from 'sales_q1_2021_w.csv'.\n\
             \nPlease enter a command: ",
            "Enter name of file to import: No sales to view.\n\
             \nPlease enter a command: ",
            "1.   2021-07-15     3              West                $13,761.00\n\
             2.*  ?              0              West                 $9,710.00\n\
             3.*  2021-09-15     3              West                         ?\n\
             -----------------------------------------------------------------\n\
             TOTAL                                                  $23,471.00\n\
             \nFile 'sales_q3_2021_w.csv' contains bad data.\n\
             Please correct the data in the file and try again.\n\
             \nPlease enter a command: ",
            "1.   2021-10-15     4              West                $13,761.00\n\
             2.   2021-11-15     4              West                 $9,710.00\n\
             3.   2021-12-15     4              West                 $8,934.00\n\
             -----------------------------------------------------------------\n\
             TOTAL                                                  $32,405.00\n\
             \nImported sales added to list.\n\
             \nPlease enter a command: ",
            "Enter name of file to import: \
             File 'sales_q4_2021_w.csv' has already been imported.\n\
             \nPlease enter a command: ",
            "Saved sales records.\n",
        ],
    );

    // Only the clean file is appended and recorded
    let saved = fs::read_to_string(dir.path().join("all_sales.csv")).unwrap();
    assert_eq!(saved.lines().count(), 10);
    assert!(saved.ends_with("13761,2021-10-15,w\n9710,2021-11-15,w\n8934,2021-12-15,w\n"));

    let log = fs::read_to_string(dir.path().join("imported_files.txt")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("sales_q4_2021_w.csv"));
    println!("✅ Import test PASSED");
}

#[test]
fn test_menu_command() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "menu\nexit\n");

    assert!(stdout.starts_with("SALES DATA IMPORTER\n\nCOMMAND MENU\n"));
    assert_eq!(stdout.matches("COMMAND MENU\n").count(), 2);
    assert_steps(
        &stdout,
        &[
            "view   - View all sales\n",
            "add1   - Add sales by typing sales, year, month, day, and region\n",
            "add2   - Add sales by typing sales, date (YYYY-MM-DD), and region\n",
            "import - Import sales from file\n",
            "menu   - Show menu\n",
            "exit   - Exit program\n",
        ],
    );
}

#[test]
fn test_invalid_command() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "anything\nexit\n");

    assert_steps(
        &stdout,
        &["Invalid command. Please try again.\n\nCOMMAND MENU\nview   - View all sales\n"],
    );
}

#[test]
fn test_commands_are_case_insensitive() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "  VIEW  \nExit\n");

    assert!(stdout.contains("TOTAL                                                  $78,512.00\n"));
    assert!(!stdout.contains("Invalid command."));
}

#[test]
fn test_exit_command() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "exit\n");

    assert!(stdout.ends_with("\nPlease enter a command: Saved sales records.\n"));
    let saved = fs::read_to_string(dir.path().join("all_sales.csv")).unwrap();
    assert_eq!(saved.lines().count(), 7);
}

#[test]
fn test_end_of_input_saves() {
    let dir = data_dir();

    let stdout = run_session(dir.path(), "view\n");

    assert!(stdout.ends_with("Saved sales records.\n"));
}

#[test]
fn test_missing_sales_file() {
    let dir = tempdir().unwrap();

    let stdout = run_session(dir.path(), "view\nexit\n");

    assert!(stdout.starts_with("Sales file not found.\nSALES DATA IMPORTER\n\n"));
    assert!(stdout.contains("No sales to view.\n"));
    assert!(dir.path().join("all_sales.csv").exists());
}

#[test]
fn test_save_failure_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no_such_dir");

    let stdout = run_session(&missing, "exit\n");

    assert!(stdout.contains("Sales data could not be saved: "));
    assert!(!stdout.contains("Saved sales records."));
}
