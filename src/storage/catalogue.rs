//! A file backed catalogue of products
//!
//! The [`Catalogue`] keeps every tracked product in a single YAML file. The
//! whole file is read when the catalogue is opened and rewritten by
//! [`Catalogue::flush`].

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::{
    ExpirationReport, Product,
    storage::record::{CatalogueFile, ProductRecord, RecordError},
};

/// The products a user is tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    path: PathBuf,
    products: Vec<Product>,
}

/// Errors that can occur when opening a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The catalogue file could not be read.
    #[error("failed to read product catalogue: {0}")]
    Io(#[from] io::Error),
    /// The catalogue file is not valid YAML, or has an unknown version.
    #[error("failed to parse product catalogue: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A stored product is invalid.
    #[error("invalid product in catalogue: {0}")]
    Record(#[from] RecordError),
}

/// Errors that can occur when writing a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The catalogue file could not be written.
    #[error("failed to write product catalogue: {0}")]
    Io(#[from] io::Error),
    /// The catalogue could not be serialized.
    #[error("failed to serialize product catalogue: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors that can occur when looking a product up by identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LookupError {
    /// No product identifier starts with the given prefix.
    #[error("no product matches '{0}'")]
    NotFound(String),
    /// More than one product identifier starts with the given prefix.
    #[error("'{0}' matches {1} products, use a longer prefix")]
    Ambiguous(String, usize),
}

impl Catalogue {
    /// Opens the catalogue stored at `path`.
    ///
    /// A missing file is an empty catalogue; it is created on the first
    /// [`flush`](Self::flush).
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - the file exists but cannot be read
    /// - the file is not a valid catalogue
    /// - any stored product is invalid
    pub fn open(path: PathBuf) -> Result<Self, LoadError> {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No catalogue at {}, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };

        let file: CatalogueFile = serde_yaml::from_reader(BufReader::new(file))?;
        let products = file
            .into_records()
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Loaded {} products from {}",
            products.len(),
            path.display()
        );

        Ok(Self { path, products })
    }

    /// Creates an empty catalogue that will be stored at `path`.
    #[must_use]
    pub const fn empty(path: PathBuf) -> Self {
        Self {
            path,
            products: Vec::new(),
        }
    }

    /// The path of the catalogue file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every product, in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// The number of products in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalogue has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The products visible to `owner`.
    ///
    /// With no owner, every product is visible.
    pub fn visible_to<'a>(&'a self, owner: Option<&str>) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| owner.is_none_or(|owner| product.is_visible_to(owner)))
    }

    /// The products visible to `owner` with their expiration reports as of
    /// `today`, most urgent first.
    ///
    /// Products expiring on the same day are ordered by name.
    #[must_use]
    pub fn by_urgency(
        &self,
        owner: Option<&str>,
        today: NaiveDate,
    ) -> Vec<(&Product, ExpirationReport)> {
        let mut entries: Vec<_> = self
            .visible_to(owner)
            .map(|product| (product, product.expiration(today)))
            .collect();
        entries.sort_by(|(a, a_report), (b, b_report)| {
            a_report.cmp(b_report).then_with(|| a.name().cmp(b.name()))
        });
        entries
    }

    /// Finds a product by a prefix of its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no product, or more than one product, matches.
    pub fn find(&self, prefix: &str) -> Result<&Product, LookupError> {
        let index = self.position(prefix)?;
        Ok(&self.products[index])
    }

    /// Finds a product by a prefix of its identifier, for editing.
    ///
    /// # Errors
    ///
    /// Returns an error if no product, or more than one product, matches.
    pub fn find_mut(&mut self, prefix: &str) -> Result<&mut Product, LookupError> {
        let index = self.position(prefix)?;
        Ok(&mut self.products[index])
    }

    /// Adds a product to the catalogue.
    ///
    /// The change is not written until [`flush`](Self::flush) is called.
    pub fn add(&mut self, product: Product) -> &Product {
        tracing::info!("Added product: {} ({})", product.name(), product.id());
        self.products.push(product);
        &self.products[self.products.len() - 1]
    }

    /// Removes a product, returning it.
    ///
    /// The change is not written until [`flush`](Self::flush) is called.
    ///
    /// # Errors
    ///
    /// Returns an error if no product, or more than one product, matches.
    pub fn remove(&mut self, prefix: &str) -> Result<Product, LookupError> {
        let index = self.position(prefix)?;
        let product = self.products.remove(index);
        tracing::info!("Removed product: {} ({})", product.name(), product.id());
        Ok(product)
    }

    /// Writes the catalogue to disk.
    ///
    /// The file is written beside the catalogue and renamed over it, so an
    /// interrupted write leaves the previous catalogue in place. Parent
    /// directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn flush(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let records: Vec<ProductRecord> = self.products.iter().map(ProductRecord::from).collect();
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staging = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(staging.as_file_mut());
            serde_yaml::to_writer(&mut writer, &CatalogueFile::from(records))?;
            writer.flush()?;
        }
        staging.as_file().sync_all()?;
        staging.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            "Wrote {} products to {}",
            self.products.len(),
            self.path.display()
        );
        Ok(())
    }

    fn position(&self, prefix: &str) -> Result<usize, LookupError> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(LookupError::NotFound(prefix.to_string()));
        }

        let matches: Vec<usize> = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| id_matches(product.id(), &needle))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [index] => Ok(*index),
            [] => Err(LookupError::NotFound(prefix.to_string())),
            many => Err(LookupError::Ambiguous(prefix.to_string(), many.len())),
        }
    }
}

fn id_matches(id: Uuid, needle: &str) -> bool {
    let hyphenated = id.hyphenated().to_string();
    hyphenated.starts_with(needle) || id.simple().to_string().starts_with(needle)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::ExpirationStatus;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn product(name: &str, opened: NaiveDate, pao_days: u32) -> Product {
        Product::new(name, opened, pao_days, today()).unwrap()
    }

    fn with_id(id: &str, name: &str) -> Product {
        Product::from_parts(
            Uuid::parse_str(id).unwrap(),
            NonEmptyString::new(name.to_string()).unwrap(),
            today(),
            NonZeroU32::new(30).unwrap(),
            None,
        )
    }

    #[test]
    fn missing_file_opens_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let catalogue = Catalogue::open(tmp.path().join("products.yaml")).unwrap();
        assert!(catalogue.is_empty());
    }

    #[test]
    fn flush_then_open() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data").join("products.yaml");

        let mut catalogue = Catalogue::open(path.clone()).unwrap();
        catalogue.add(product("Moisturiser", date(2024, 5, 1), 180));
        catalogue.add(product("Mascara", date(2024, 4, 1), 90).with_owner("alice"));
        catalogue.flush().unwrap();

        let reopened = Catalogue::open(path).unwrap();
        assert_eq!(reopened, catalogue);
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.yaml");
        std::fs::write(&path, "_version: '9'\nproducts: []\n").unwrap();

        assert!(matches!(Catalogue::open(path), Err(LoadError::Yaml(_))));
    }

    #[test]
    fn invalid_record_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.yaml");
        std::fs::write(
            &path,
            "_version: '1'\nproducts:\n- id: 00000000-0000-0000-0000-000000000000\n  name: Toner\n  opened: 2024-01-01\n  pao_days: 0\n",
        )
        .unwrap();

        assert!(matches!(
            Catalogue::open(path),
            Err(LoadError::Record(RecordError::ZeroPao(_)))
        ));
    }

    #[test]
    fn owner_filtering() {
        let mut catalogue = Catalogue::empty(PathBuf::from("products.yaml"));
        catalogue.add(product("Shared", today(), 30));
        catalogue.add(product("Alice's", today(), 30).with_owner("alice"));
        catalogue.add(product("Bob's", today(), 30).with_owner("bob"));

        let names = |owner| {
            catalogue
                .visible_to(owner)
                .map(Product::name)
                .collect::<Vec<_>>()
        };

        assert_eq!(names(None), ["Shared", "Alice's", "Bob's"]);
        assert_eq!(names(Some("alice")), ["Shared", "Alice's"]);
    }

    #[test]
    fn listing_outlives_the_owner_filter() {
        let mut catalogue = Catalogue::empty(PathBuf::from("products.yaml"));
        catalogue.add(product("Shared", today(), 30));
        catalogue.add(product("Bob's", today(), 30).with_owner("bob"));

        let listing = {
            let owner = String::from("alice");
            catalogue.by_urgency(Some(&owner), today())
        };

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].0.name(), "Shared");
    }

    #[test]
    fn flush_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.yaml");
        std::fs::write(&path, "_version: '1'\nproducts: []\n").unwrap();

        let mut catalogue = Catalogue::open(path.clone()).unwrap();
        catalogue.add(product("Toner", date(2024, 5, 1), 180));
        catalogue.flush().unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "no staging file is left behind");
        assert_eq!(Catalogue::open(path).unwrap(), catalogue);
    }

    #[test]
    fn by_urgency_orders_most_urgent_first() {
        let mut catalogue = Catalogue::empty(PathBuf::from("products.yaml"));
        catalogue.add(product("Sunscreen", date(2024, 5, 1), 365));
        catalogue.add(product("Eye cream", date(2024, 1, 1), 90));
        catalogue.add(product("Serum", date(2024, 5, 1), 35));
        catalogue.add(product("Cleanser", date(2024, 5, 1), 35));

        let listing = catalogue.by_urgency(None, today());
        let summary: Vec<_> = listing
            .iter()
            .map(|(product, report)| (product.name(), report.status))
            .collect();

        assert_eq!(
            summary,
            [
                ("Eye cream", ExpirationStatus::Expired),
                ("Cleanser", ExpirationStatus::Warning),
                ("Serum", ExpirationStatus::Warning),
                ("Sunscreen", ExpirationStatus::Good),
            ]
        );
    }

    #[test]
    fn lookup_by_prefix() {
        let mut catalogue = Catalogue::empty(PathBuf::from("products.yaml"));
        catalogue.add(with_id("1a2b3c4d-0000-4000-8000-000000000001", "Toner"));
        catalogue.add(with_id("1a2b9999-0000-4000-8000-000000000002", "Serum"));

        assert_eq!(catalogue.find("1a2b3").unwrap().name(), "Toner");
        assert_eq!(catalogue.find("1A2B9").unwrap().name(), "Serum");
        assert_eq!(
            catalogue.find("1a2b").unwrap_err(),
            LookupError::Ambiguous("1a2b".to_string(), 2)
        );
        assert_eq!(
            catalogue.find("ffff").unwrap_err(),
            LookupError::NotFound("ffff".to_string())
        );
        assert!(catalogue.find("").is_err());
    }

    #[test]
    fn edit_and_remove() {
        let mut catalogue = Catalogue::empty(PathBuf::from("products.yaml"));
        catalogue.add(with_id("1a2b3c4d-0000-4000-8000-000000000001", "Toner"));

        catalogue.find_mut("1a2b").unwrap().set_name("Essence").unwrap();
        assert_eq!(catalogue.find("1a2b").unwrap().name(), "Essence");

        let removed = catalogue.remove("1a2b").unwrap();
        assert_eq!(removed.name(), "Essence");
        assert!(catalogue.is_empty());
        assert!(catalogue.remove("1a2b").is_err());
    }
}
