//! # Menu Loop
//!
//! The interactive front end over one product store.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──► show menu ──► read option ──► clear                              │
//! │  │                       │                                              │
//! │  │        ┌──────────────┼──────────────┬───────────────┐              │
//! │  │        ▼              ▼              ▼               ▼              │
//! │  │     1..=7 action   invalid       8 (Salir)      end of input         │
//! │  │        │              │              │               │              │
//! │  │        ▼              ▼              └──────┬────────┘              │
//! │  │   Ok or reported  reported                  ▼                       │
//! │  │        │              │                 goodbye                     │
//! │  │        └──────┬───────┘                                             │
//! │  │               ▼                                                      │
//! │  └──── pause (Enter) + clear                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input, not-found, backend and export errors are shown to the operator and
//! the loop goes on. Only a broken terminal ends it early.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use stockroom_core::validation::{parse_id, parse_price, parse_stock, validate_product_name};
use stockroom_core::{CoreError, NewProduct, Product, ProductId, ProductPatch, LOW_STOCK_THRESHOLD};
use stockroom_db::ProductRepository;
use tracing::{info, warn};

use crate::console::Console;
use crate::error::{AppError, AppResult};
use crate::export::write_report;

const WIDE: usize = 60;
const NARROW: usize = 30;
const MENU_WIDTH: usize = 50;

// =============================================================================
// Menu Options
// =============================================================================

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    List,
    Find,
    Update,
    Delete,
    Export,
    LowStock,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 8] = [
        MenuOption::Add,
        MenuOption::List,
        MenuOption::Find,
        MenuOption::Update,
        MenuOption::Delete,
        MenuOption::Export,
        MenuOption::LowStock,
        MenuOption::Quit,
    ];

    /// Parses the operator's choice, `"1"` through `"8"`.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|o| o == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Add => "📦 Agregar producto",
            MenuOption::List => "📋 Ver todos los productos",
            MenuOption::Find => "🔍 Buscar producto por ID",
            MenuOption::Update => "✏️  Actualizar producto",
            MenuOption::Delete => "🗑️  Eliminar producto",
            MenuOption::Export => "📄 Exportar inventario a archivo",
            MenuOption::LowStock => "🟡 Consultar productos con stock bajo",
            MenuOption::Quit => "🚪 Salir",
        }
    }
}

/// What the loop does after an action.
enum Flow {
    Continue,
    /// Input ran out mid-action.
    Quit,
}

// =============================================================================
// App
// =============================================================================

pub struct App<R, W> {
    repo: Box<dyn ProductRepository>,
    console: Console<R, W>,
    store_name: String,
    export_dir: PathBuf,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        repo: Box<dyn ProductRepository>,
        console: Console<R, W>,
        store_name: impl Into<String>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        App {
            repo,
            console,
            store_name: store_name.into(),
            export_dir: export_dir.into(),
        }
    }

    pub fn repository(&self) -> &dyn ProductRepository {
        self.repo.as_ref()
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs the menu until the operator quits or input ends.
    ///
    /// Returns `Err` only when the terminal itself fails.
    pub async fn run(&mut self) -> AppResult<()> {
        info!(backend = self.repo.backend_name(), "Session started");

        loop {
            self.show_menu()?;
            let Some(choice) = self.console.prompt("Seleccione una opción (1-8): ")? else {
                break;
            };
            self.console.clear()?;

            let outcome = match MenuOption::parse(&choice) {
                Some(MenuOption::Quit) => break,
                Some(option) => self.dispatch(option).await,
                None => Err(AppError::InvalidOption(choice.trim().to_string())),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.report(&e)?,
            }

            if !self.console.pause()? {
                break;
            }
            self.console.clear()?;
        }

        self.console.say("¡Gracias por usar el Sistema de Inventario!")?;
        self.console.say("🔒 Cerrando aplicación...")?;
        info!("Closing application");
        Ok(())
    }

    /// Releases the store. Call once after `run`, whatever it returned.
    pub async fn shutdown(&mut self) {
        self.repo.close().await;
    }

    async fn dispatch(&mut self, option: MenuOption) -> AppResult<Flow> {
        match option {
            MenuOption::Add => self.add_product().await,
            MenuOption::List => self.list_products().await,
            MenuOption::Find => self.find_product().await,
            MenuOption::Update => self.update_product().await,
            MenuOption::Delete => self.delete_product().await,
            MenuOption::Export => self.export_products().await,
            MenuOption::LowStock => self.low_stock_products().await,
            MenuOption::Quit => Ok(Flow::Quit),
        }
    }

    /// Shows a failed action to the operator.
    ///
    /// Repositories and the exporter log their own failures; only rejected
    /// input is logged here.
    fn report(&mut self, err: &AppError) -> AppResult<()> {
        if err.is_user_error() {
            warn!(error = %err, "Rejected operator input");
        }
        self.console.say(format!("❌ {}", err.user_message()))?;
        Ok(())
    }

    // =========================================================================
    // Screens
    // =========================================================================

    fn show_menu(&mut self) -> AppResult<()> {
        self.console.blank()?;
        self.console.rule('=', MENU_WIDTH)?;
        self.console
            .say(format!("SISTEMA DE GESTIÓN DE INVENTARIO - {}", self.store_name))?;
        self.console
            .say(format!("Almacenamiento: {}", self.repo.backend_name()))?;
        self.console.rule('=', MENU_WIDTH)?;
        for option in MenuOption::ALL {
            self.console
                .say(format!("{}. {}", option.number(), option.label()))?;
        }
        self.console.rule('=', MENU_WIDTH)?;
        Ok(())
    }

    fn heading(&mut self, title: &str, width: usize) -> AppResult<()> {
        self.console.say(title)?;
        self.console.rule('-', width)?;
        Ok(())
    }

    fn show_line(&mut self, product: &Product) -> AppResult<()> {
        self.console.say(format!(
            "ID: {} | {} | Precio: {} | Stock: {} | {}",
            product.id,
            product.name,
            product.price,
            product.stock,
            product.stock_status()
        ))?;
        Ok(())
    }

    /// Reads an id; `Ok(None)` at end of input.
    fn ask_id(&mut self, label: &str) -> AppResult<Option<ProductId>> {
        match self.console.prompt(label)? {
            Some(input) => Ok(Some(parse_id(&input)?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    async fn add_product(&mut self) -> AppResult<Flow> {
        self.heading("📦 AGREGAR NUEVO PRODUCTO", NARROW)?;

        let Some(name) = self.console.prompt("Nombre del producto: ")? else {
            return Ok(Flow::Quit);
        };
        let name = name.trim().to_string();
        validate_product_name(&name)?;

        let Some(price) = self.console.prompt("Precio del producto ($): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(stock) = self.console.prompt("Cantidad en stock: ")? else {
            return Ok(Flow::Quit);
        };
        let price = parse_price(&price)?;
        let stock = parse_stock(&stock)?;

        let product = self.repo.create(NewProduct::new(name, price, stock)).await?;
        self.console.say(format!(
            "✅ Producto agregado con ID {}: {}",
            product.id, product.name
        ))?;
        Ok(Flow::Continue)
    }

    async fn list_products(&mut self) -> AppResult<Flow> {
        self.heading("📦 INVENTARIO COMPLETO:", WIDE)?;

        let products = self.repo.list().await?;
        if products.is_empty() {
            self.console.say("No hay productos registrados.")?;
        } else {
            for product in &products {
                self.show_line(product)?;
            }
        }
        self.console.rule('-', WIDE)?;
        self.console
            .say(format!("Total de productos: {}", products.len()))?;
        Ok(Flow::Continue)
    }

    async fn find_product(&mut self) -> AppResult<Flow> {
        self.heading("🔍 BUSCAR PRODUCTO", NARROW)?;

        let Some(id) = self.ask_id("ID del producto a buscar: ")? else {
            return Ok(Flow::Quit);
        };
        let product = self
            .repo
            .get(id)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;

        self.console.blank()?;
        self.console.say("📋 DETALLE DEL PRODUCTO:")?;
        self.console.say(format!("ID: {}", product.id))?;
        self.console.say(format!("Nombre: {}", product.name))?;
        self.console.say(format!("Precio: {}", product.price))?;
        self.console
            .say(format!("Stock: {} unidades ({})", product.stock, product.stock_status()))?;
        Ok(Flow::Continue)
    }

    async fn update_product(&mut self) -> AppResult<Flow> {
        self.heading("✏️  ACTUALIZAR PRODUCTO", NARROW)?;

        let Some(id) = self.ask_id("ID del producto a actualizar: ")? else {
            return Ok(Flow::Quit);
        };
        let current = self
            .repo
            .get(id)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;

        self.console.blank()?;
        self.console
            .say("💡 Deje en blanco los campos que no desea cambiar:")?;

        let Some(name) = self
            .console
            .prompt(&format!("Nuevo nombre (actual: {}): ", current.name))?
        else {
            return Ok(Flow::Quit);
        };
        let Some(price) = self.console.prompt(&format!(
            "Nuevo precio (actual: {}): ",
            current.price.to_decimal_string()
        ))?
        else {
            return Ok(Flow::Quit);
        };
        let Some(stock) = self
            .console
            .prompt(&format!("Nuevo stock (actual: {}): ", current.stock))?
        else {
            return Ok(Flow::Quit);
        };

        let mut patch = ProductPatch::default();
        if !name.trim().is_empty() {
            patch = patch.with_name(name.trim());
        }
        if !price.trim().is_empty() {
            patch = patch.with_price(parse_price(&price)?);
        }
        if !stock.trim().is_empty() {
            patch = patch.with_stock(parse_stock(&stock)?);
        }

        if patch.is_empty() {
            self.console.say("No se realizaron cambios.")?;
            return Ok(Flow::Continue);
        }

        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;
        self.console.say("✅ Producto actualizado correctamente.")?;
        self.show_line(&updated)?;
        Ok(Flow::Continue)
    }

    async fn delete_product(&mut self) -> AppResult<Flow> {
        self.heading("🗑️  ELIMINAR PRODUCTO", NARROW)?;

        let Some(id) = self.ask_id("ID del producto a eliminar: ")? else {
            return Ok(Flow::Quit);
        };
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(id));
        }

        self.console.say("✅ Producto eliminado correctamente.")?;
        Ok(Flow::Continue)
    }

    async fn export_products(&mut self) -> AppResult<Flow> {
        self.heading("📄 EXPORTAR INVENTARIO", NARROW)?;

        let Some(name) = self.console.prompt("Nombre del archivo (sin extensión): ")? else {
            return Ok(Flow::Quit);
        };
        let products = self.repo.list().await?;
        let path = write_report(&self.export_dir, &name, &products)?;

        self.console.say(format!(
            "✅ {} productos exportados correctamente a {}",
            products.len(),
            path.display()
        ))?;
        Ok(Flow::Continue)
    }

    async fn low_stock_products(&mut self) -> AppResult<Flow> {
        self.heading(
            &format!("🟡 PRODUCTOS CON STOCK BAJO (<= {LOW_STOCK_THRESHOLD} unidades)"),
            WIDE,
        )?;

        let products = self.repo.low_stock().await?;
        if products.is_empty() {
            self.console.say("No hay productos con stock bajo 👌")?;
        } else {
            for product in &products {
                self.show_line(product)?;
            }
        }
        self.console.rule('-', WIDE)?;
        Ok(Flow::Continue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stockroom_core::Money;
    use stockroom_db::{Database, DbConfig, ListRepository, MapRepository};

    type TestApp = App<Cursor<Vec<u8>>, Vec<u8>>;

    fn app_with_bytes(repo: Box<dyn ProductRepository>, input: &[u8], export_dir: PathBuf) -> TestApp {
        let console = Console::new(Cursor::new(input.to_vec()), Vec::new(), false);
        App::new(repo, console, "TECH STORE", export_dir)
    }

    fn app_with(repo: Box<dyn ProductRepository>, script: &str, export_dir: PathBuf) -> TestApp {
        app_with_bytes(repo, script.as_bytes(), export_dir)
    }

    fn app(script: &str) -> TestApp {
        app_with(Box::new(MapRepository::new()), script, PathBuf::from("unused"))
    }

    fn seeded(script: &str, stocks: &[i64]) -> TestApp {
        let seed = stocks
            .iter()
            .enumerate()
            .map(|(i, &stock)| NewProduct::new(format!("P{}", i + 1), Money::from_cents(1000), stock));
        app_with(
            Box::new(MapRepository::with_seed(seed)),
            script,
            PathBuf::from("unused"),
        )
    }

    fn output(app: &TestApp) -> String {
        String::from_utf8(app.console().output().clone()).unwrap()
    }

    #[test]
    fn test_menu_option_parse() {
        assert_eq!(MenuOption::parse("1"), Some(MenuOption::Add));
        assert_eq!(MenuOption::parse(" 8 "), Some(MenuOption::Quit));
        assert_eq!(MenuOption::parse("0"), None);
        assert_eq!(MenuOption::parse("9"), None);
        assert_eq!(MenuOption::parse("dos"), None);
        assert_eq!(MenuOption::LowStock.number(), 7);
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let mut app = app("1\nWidget\n9.99\n3\n\n2\n\n8\n");
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("✅ Producto agregado con ID 1: Widget"));
        assert!(out.contains("ID: 1 | Widget | Precio: $9.99 | Stock: 3 | STOCK BAJO"));
        assert!(out.contains("Total de productos: 1"));
        assert!(out.contains("¡Gracias por usar el Sistema de Inventario!"));
    }

    #[tokio::test]
    async fn test_non_numeric_price_changes_nothing() {
        let mut app = app("1\nWidget\nabc\n3\n\n8\n");
        app.run().await.unwrap();

        assert!(output(&app).contains("Ingrese un valor numérico válido para precio"));
        assert!(app.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_skips_remaining_prompts() {
        let mut app = app("1\n   \n\n8\n");
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("❌ El nombre no puede estar vacío."));
        assert!(!out.contains("Precio del producto"));
        assert!(app.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected() {
        let mut app = app("1\nWidget\n5\n-2\n\n8\n");
        app.run().await.unwrap();

        assert!(output(&app).contains("El stock no puede ser negativo."));
        assert!(app.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_shows_detail() {
        let mut app = seeded("3\n1\n\n3\n42\n\n3\nx\n\n8\n", &[3]);
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("📋 DETALLE DEL PRODUCTO:"));
        assert!(out.contains("Nombre: P1"));
        assert!(out.contains("Precio: $10.00"));
        assert!(out.contains("Stock: 3 unidades"));
        assert!(out.contains("Producto con ID 42 no encontrado."));
        assert!(out.contains("Ingrese un valor numérico válido para ID"));
    }

    #[tokio::test]
    async fn test_update_blank_keeps_current_values() {
        let mut app = seeded("4\n1\n\n\n0\n\n8\n", &[5]);
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("Nuevo nombre (actual: P1): "));
        assert!(out.contains("Nuevo precio (actual: 10.00): "));
        assert!(out.contains("✅ Producto actualizado correctamente."));

        let p = app.repository().get(1).await.unwrap().unwrap();
        assert_eq!((p.name.as_str(), p.price.cents(), p.stock), ("P1", 1000, 0));
    }

    #[tokio::test]
    async fn test_update_all_blank_is_no_change() {
        let mut app = seeded("4\n1\n\n\n\n\n8\n", &[5]);
        app.run().await.unwrap();

        assert!(output(&app).contains("No se realizaron cambios."));
        assert_eq!(app.repository().get(1).await.unwrap().unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_update_unknown_id_asks_nothing_more() {
        let mut app = seeded("4\n7\n\n8\n", &[5]);
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("Producto con ID 7 no encontrado."));
        assert!(!out.contains("Nuevo nombre"));
    }

    #[tokio::test]
    async fn test_delete_existing_and_unknown() {
        let mut app = seeded("5\n1\n\n5\n1\n\n8\n", &[5, 6]);
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("✅ Producto eliminado correctamente."));
        assert!(out.contains("Producto con ID 1 no encontrado."));
        let ids: Vec<_> = app
            .repository()
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let mut app = seeded("7\n\n8\n", &[12, 5, 0, 6, 3]);
        app.run().await.unwrap();

        let out = output(&app);
        let first = out.find("ID: 3 | P3").unwrap();
        let second = out.find("ID: 5 | P5").unwrap();
        let third = out.find("ID: 2 | P2").unwrap();
        assert!(first < second && second < third);
        assert!(out.contains("ID: 3 | P3 | Precio: $10.00 | Stock: 0 | SIN STOCK"));
        assert!(!out.contains("ID: 1 | P1"));
        assert!(!out.contains("ID: 4 | P4"));
    }

    #[tokio::test]
    async fn test_low_stock_empty() {
        let mut app = seeded("7\n\n8\n", &[12]);
        app.run().await.unwrap();
        assert!(output(&app).contains("No hay productos con stock bajo"));
    }

    #[tokio::test]
    async fn test_export_writes_report() {
        let tmp = tempfile::tempdir().unwrap();
        let export_dir = tmp.path().join("exports-txt");
        let repo = ListRepository::with_seed(vec![
            NewProduct::new("Widget", Money::from_cents(999), 3),
            NewProduct::new("Cable", Money::from_cents(650), 20),
        ]);
        let mut app = app_with(Box::new(repo), "6\ninventario\n\n6\n../x\n\n8\n", export_dir.clone());
        app.run().await.unwrap();

        let body = std::fs::read_to_string(export_dir.join("inventario.txt")).unwrap();
        assert!(body.starts_with("REPORTE DE INVENTARIO\n"));
        assert!(body.contains("ID: 1 | Widget | Precio: $9.99 | Stock: 3\n"));
        assert!(body.contains("ID: 2 | Cable | Precio: $6.50 | Stock: 20\n"));

        let out = output(&app);
        assert!(out.contains("✅ 2 productos exportados correctamente a"));
        assert!(out.contains("Formato inválido para nombre del archivo"));
    }

    #[tokio::test]
    async fn test_invalid_option_then_quit() {
        let mut app = app("9\n\nhola\n\n8\n");
        app.run().await.unwrap();

        let out = output(&app);
        assert_eq!(
            out.matches("❌ Opción no válida. Por favor seleccione una opción del 1 al 8.")
                .count(),
            2
        );
        assert!(out.contains("Presione Enter para continuar..."));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let mut app = app("2\n");
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("No hay productos registrados."));
        assert!(out.ends_with("🔒 Cerrando aplicación...\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_mid_action() {
        let mut app = app("1\nWidget\n");
        app.run().await.unwrap();

        assert!(output(&app).contains("¡Gracias por usar el Sistema de Inventario!"));
        assert!(app.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_widget_scenario_through_menu() {
        let script = "1\nWidget\n9.99\n3\n\n4\n1\n\n\n0\n\n7\n\n5\n1\n\n3\n1\n\n8\n";
        let mut app = app(script);
        app.run().await.unwrap();

        let out = output(&app);
        assert!(out.contains("✅ Producto agregado con ID 1: Widget"));
        assert!(out.contains("ID: 1 | Widget | Precio: $9.99 | Stock: 0 | SIN STOCK"));
        assert!(out.contains("✅ Producto eliminado correctamente."));
        assert!(out.contains("Producto con ID 1 no encontrado."));
        assert!(app.repository().get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_utf8_input_does_not_end_session() {
        let input = b"1\nWid\xffget\n9.99\n3\n\n1\nOk\n1\n1\n\n8\n";
        let mut app = app_with_bytes(Box::new(MapRepository::new()), input, PathBuf::from("unused"));
        app.run().await.unwrap();

        let names: Vec<_> = app
            .repository()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Wid\u{FFFD}get".to_string(), "Ok".to_string()]);
        assert!(output(&app).contains("¡Gracias por usar el Sistema de Inventario!"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported_and_loop_continues() {
        let mut repo = Database::new(DbConfig::in_memory()).await.unwrap().products();
        repo.close().await;

        let script = "1\nWidget\n9.99\n3\n\n2\n\n9\n\n8\n";
        let mut app = app_with(Box::new(repo), script, PathBuf::from("unused"));
        app.run().await.unwrap();
        app.shutdown().await;

        let out = output(&app);
        assert_eq!(
            out.matches("❌ Ocurrió un error en el almacenamiento. La operación no se aplicó.")
                .count(),
            2
        );
        assert!(!out.contains("✅ Producto agregado"));
        assert!(out.contains("❌ Opción no válida."));
        assert!(out.contains("¡Gracias por usar el Sistema de Inventario!"));
    }
}
