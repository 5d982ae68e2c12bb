//! Interactive menu over a [`Session`].
//!
//! The shell is generic over its input and output so it can be driven by a
//! terminal or by a scripted buffer in tests. End of input behaves like
//! choosing "0) Salir".

use std::io::{self, BufRead, Write};

use atlas_core::{RawCountry, parse_number};
use atlas_ingest::{Session, SessionError};
use atlas_model::{CountryError, Field, Filter, SortField};
use tracing::{debug, error};

use crate::render::{write_countries, write_statistics};
use crate::settings::DisplaySettings;

const MENU: &str = "
======== MENÚ ========
1) Agregar país
2) Actualizar población/superficie
3) Buscar país por nombre (parcial o exacto)
4) Filtrar países
5) Ordenar países
6) Mostrar estadísticas
0) Salir
======================
";

const GOODBYE: &str = "¡Hasta luego!";
const INVALID_OPTION: &str = "Opción inválida.";

pub struct Shell<R, W> {
    input: R,
    output: W,
    session: Session,
    display: DisplaySettings,
    eof: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: Session, display: DisplaySettings, input: R, output: W) -> Self {
        Self {
            input,
            output,
            session,
            display,
            eof: false,
        }
    }

    /// Give the session back, e.g. to close it.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\nSistema de Gestión de Países — CSV: {}",
            self.session.path().display()
        )?;

        loop {
            writeln!(self.output, "{MENU}")?;
            let option = self.ask("Opción: ")?;
            if self.eof && option.is_empty() {
                writeln!(self.output)?;
                break;
            }
            debug!(option = %option, "menu option");
            match option.as_str() {
                "1" => self.add()?,
                "2" => self.update()?,
                "3" => self.search()?,
                "4" => self.filter()?,
                "5" => self.sort()?,
                "6" => self.statistics()?,
                "0" => break,
                _ => writeln!(self.output, "{INVALID_OPTION}")?,
            }
            if self.eof {
                break;
            }
        }
        writeln!(self.output, "{GOODBYE}")?;
        self.output.flush()
    }

    /// Print `prompt` and read one trimmed line. Empty at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
        }
        Ok(line.trim().to_string())
    }

    fn add(&mut self) -> io::Result<()> {
        let name = self.ask("Nombre: ")?;
        let population = self.ask("Población (entero ≥ 0): ")?;
        let area = self.ask("Superficie km² (entero > 0): ")?;
        let continent = self.ask("Continente: ")?;
        let raw = RawCountry::new(&name, &population, &area, &continent);
        match self.session.add_from_text(&raw) {
            Ok(()) => writeln!(self.output, "País agregado correctamente."),
            Err(error) => self.report(&error),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        let name = self.ask("Nombre del país a actualizar: ")?;
        let population = self.ask("Nueva población (Enter para no cambiar): ")?;
        let area = self.ask("Nueva superficie (Enter para no cambiar): ")?;
        match self
            .session
            .update_from_text(&name, Some(population.as_str()), Some(area.as_str()))
        {
            Ok(()) => writeln!(self.output, "Datos actualizados."),
            Err(error) => self.report(&error),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let pattern = self.ask("Nombre o parte del nombre: ")?;
        let results = self.session.store().search(&pattern);
        write_countries(&mut self.output, &results, self.display.style)
    }

    fn filter(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "a) Por continente | b) Rango población | c) Rango superficie"
        )?;
        let choice = self.ask("Elegí a/b/c: ")?.to_lowercase();
        let filter = match choice.as_str() {
            "a" => Filter::Continent {
                name: self.ask("Continente: ")?,
            },
            "b" => match self.ask_range(Field::Population, "Población")? {
                Ok((min, max)) => Filter::Population { min, max },
                Err(error) => return self.report_record(&error),
            },
            "c" => match self.ask_range(Field::Area, "Superficie")? {
                Ok((min, max)) => Filter::Area { min, max },
                Err(error) => return self.report_record(&error),
            },
            _ => return writeln!(self.output, "{INVALID_OPTION}"),
        };
        match self.session.store().filter(&filter) {
            Ok(results) => write_countries(&mut self.output, &results, self.display.style),
            Err(error) => self.report_record(&error),
        }
    }

    /// Read optional lower and upper bounds. Blank means unbounded.
    fn ask_range(
        &mut self,
        field: Field,
        label: &str,
    ) -> io::Result<Result<(Option<u64>, Option<u64>), CountryError>> {
        let min = self.ask(&format!("{label} mínima: "))?;
        let max = self.ask(&format!("{label} máxima: "))?;
        Ok(parse_bound(field, &min).and_then(|min| Ok((min, parse_bound(field, &max)?))))
    }

    fn sort(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Ordenar por: a) nombre  b) población  c) superficie"
        )?;
        let field = match self.ask("Elegí a/b/c: ")?.to_lowercase().as_str() {
            "b" => SortField::Population,
            "c" => SortField::Area,
            _ => SortField::Name,
        };
        let descending = self.ask("Descendente? (s/n): ")?.to_lowercase() == "s";
        let sorted = self.session.store().sorted(field, descending);
        write_countries(&mut self.output, &sorted, self.display.style)
    }

    fn statistics(&mut self) -> io::Result<()> {
        let stats = self.session.store().statistics();
        write_statistics(&mut self.output, &stats, self.display)
    }

    fn report(&mut self, failure: &SessionError) -> io::Result<()> {
        if let SessionError::Persist(source) = failure {
            error!(error = %source, "save failed");
        }
        writeln!(self.output, "→ {}", failure.user_message())
    }

    fn report_record(&mut self, failure: &CountryError) -> io::Result<()> {
        writeln!(self.output, "→ Error: {failure}")
    }
}

fn parse_bound(field: Field, text: &str) -> Result<Option<u64>, CountryError> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_number(field, text).map(Some)
}
