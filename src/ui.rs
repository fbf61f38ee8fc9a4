// 🖥️ Console UI - title, command menu and the command loop
//
// All output goes through the InputAccess writer so a whole session can be
// replayed against in-memory buffers.

use crate::entities::Sales;
use crate::input::InputAccess;
use crate::manager::SalesManager;
use crate::report;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const COMMAND_W: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    View,
    Add1,
    Add2,
    Import,
    Menu,
    Exit,
}

impl Command {
    /// Menu order
    pub const ALL: [Command; 6] = [
        Command::View,
        Command::Add1,
        Command::Add2,
        Command::Import,
        Command::Menu,
        Command::Exit,
    ];

    /// Case-insensitive, surrounding whitespace ignored
    pub fn parse(input: &str) -> Option<Self> {
        let keyword = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|cmd| cmd.keyword() == keyword)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::View => "view",
            Command::Add1 => "add1",
            Command::Add2 => "add2",
            Command::Import => "import",
            Command::Menu => "menu",
            Command::Exit => "exit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::View => "View all sales",
            Command::Add1 => "Add sales by typing sales, year, month, day, and region",
            Command::Add2 => "Add sales by typing sales, date (YYYY-MM-DD), and region",
            Command::Import => "Import sales from file",
            Command::Menu => "Show menu",
            Command::Exit => "Exit program",
        }
    }
}

pub struct ConsoleUi<R, W> {
    io: InputAccess<R, W>,
    manager: SalesManager,
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(manager: SalesManager, reader: R, writer: W) -> Self {
        ConsoleUi {
            io: InputAccess::new(reader, writer),
            manager,
        }
    }

    pub fn into_writer(self) -> W {
        self.io.into_inner().1
    }

    /// Startup notice, title, menu, then commands until exit
    pub fn run(&mut self) -> Result<()> {
        if !self.manager.sales_file_found() {
            writeln!(self.io.out(), "Sales file not found.")?;
        }
        self.display_title()?;
        self.display_menu()?;
        self.execute_command()
    }

    pub fn display_title(&mut self) -> Result<()> {
        writeln!(self.io.out(), "SALES DATA IMPORTER\n")?;
        Ok(())
    }

    pub fn display_menu(&mut self) -> Result<()> {
        let out = self.io.out();
        writeln!(out, "COMMAND MENU")?;
        for cmd in Command::ALL {
            writeln!(out, "{:COMMAND_W$} - {}", cmd.keyword(), cmd.description())?;
        }
        Ok(())
    }

    /// Read and run commands. Returns after `exit` or end of input, once
    /// the master file has been saved.
    pub fn execute_command(&mut self) -> Result<()> {
        loop {
            let Some(action) = self.io.read_line("\nPlease enter a command: ")? else {
                debug!("end of input, exiting");
                break;
            };

            match Command::parse(&action) {
                Some(Command::Exit) => break,
                Some(Command::View) => {
                    report::view_sales(self.io.out(), self.manager.sales())?;
                }
                Some(Command::Add1) => {
                    let sales = self.io.from_input1(self.manager.regions())?;
                    self.add_sales(sales)?;
                }
                Some(Command::Add2) => {
                    let sales = self.io.from_input2(self.manager.regions())?;
                    self.add_sales(sales)?;
                }
                Some(Command::Import) => self.import_sales()?,
                Some(Command::Menu) => self.display_menu()?,
                None => {
                    writeln!(self.io.out(), "Invalid command. Please try again.\n")?;
                    self.display_menu()?;
                }
            }
        }

        self.save_all_sales()
    }

    fn add_sales(&mut self, sales: Sales) -> Result<()> {
        let added = self.manager.add_sales(sales);
        let date = added.date_text();
        writeln!(self.io.out(), "Sales for {} is added.\n", date)?;
        Ok(())
    }

    fn import_sales(&mut self) -> Result<()> {
        let filename = self.io.prompt("Enter name of file to import: ")?;

        let file = match self.manager.check_sales_file(&filename) {
            Ok(file) => file,
            Err(e) => {
                writeln!(self.io.out(), "{}", e)?;
                return Ok(());
            }
        };

        let imported = match self.manager.read_sales_file(&file) {
            Ok(imported) => imported,
            Err(e) => {
                warn!(file = %file.path().display(), "import failed: {}", e);
                writeln!(self.io.out(), "{}", e)?;
                return Ok(());
            }
        };

        let has_bad_data = report::view_sales(self.io.out(), &imported)?;
        if has_bad_data {
            writeln!(
                self.io.out(),
                "File '{}' contains bad data.\nPlease correct the data in the file and try again.",
                file.filename()
            )?;
        } else if !imported.is_empty() {
            let result = self.manager.accept_import(&file, imported);
            writeln!(self.io.out(), "Imported sales added to list.")?;
            if let Err(e) = result {
                writeln!(self.io.out(), "{}", e)?;
            }
        }

        Ok(())
    }

    fn save_all_sales(&mut self) -> Result<()> {
        match self.manager.save_all_sales() {
            Ok(()) => writeln!(self.io.out(), "Saved sales records.")?,
            Err(e) => writeln!(self.io.out(), "Sales data could not be saved: {:#}", e)?,
        }
        Ok(())
    }
}
