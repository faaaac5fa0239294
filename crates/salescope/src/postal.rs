//! City to postal-code lookup used by the enrichment step.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SalescopeError};

/// Built-in postal ranges for German cities in the Global Superstore data.
///
/// Values are a single code, a `first-last` range, or comma-separated
/// alternates after a range.
const GERMAN_CITIES: &[(&str, &str)] = &[
    ("Berlin", "10115-14199"),
    ("Leipzig", "04103-04357"),
    ("Munster", "48143-48167"),
    ("Celle", "29221-29229"),
    ("Duisburg", "47051-47279"),
    ("Krefeld", "47798-47839"),
    ("Augsburg", "86150-86199"),
    ("Hanover", "30159-30669"),
    ("Bremen", "28195-28779"),
    ("Bochum", "44787-44894"),
    ("Hamburg", "20095-21149, 22041"),
    ("Moers", "47441-47447"),
    ("Iserlohn", "58636-58644"),
    ("Weimar", "99423-99427"),
    ("Erlangen", "91052-91058"),
    ("Regensburg", "93047-93059"),
    ("Garbsen", "30823-30827"),
    ("Menden", "58706-58710"),
    ("Wetzlar", "35578-35586"),
    ("Nuremberg", "90402-90491"),
    ("Dortmund", "44135-44388"),
    ("Schwerin", "19053-19061"),
    ("Herford", "32049-32052"),
    ("Munich", "80331-81929"),
    ("Euskirchen", "53879-53881"),
    ("Frankfurt", "60306-60599, 65929-65936"),
    ("Trier", "54290-54296"),
    ("Stuttgart", "70173-70629"),
    ("Reutlingen", "72760-72770"),
    ("Rostock", "18055-18147"),
    ("Aachen", "52062-52080"),
    ("Dormagen", "41539-41542"),
    ("Mainz", "55116-55131"),
    ("Gronau", "48599"),
    ("Solingen", "42651-42719"),
    ("Cologne", "50667-51149"),
    ("Bottrop", "46236-46244"),
    ("Ulm", "89073-89081"),
    ("Castrop-Rauxel", "44575-44581"),
    ("Bonn", "53111-53229"),
    ("Herne", "44623-44653"),
    ("Oberhausen", "46045-46149"),
    ("Stolberg", "52222-52224"),
    ("Jena", "07743-07751"),
    ("Hildesheim", "31134-31141"),
    ("Wilhelmshaven", "26382-26389"),
    ("Kassel", "34117-34134"),
    ("Sindelfingen", "71063-71069"),
    ("Essen", "45127-45359"),
    ("Bielefeld", "33602-33739"),
    ("Langenhagen", "30851-30855"),
    ("Offenburg", "77652-77656"),
    ("Hamm", "59063-59077"),
    ("Remscheid", "42853-42899"),
    ("Brandenburg", "14770-14776"),
    ("Halle", "06108-06132"),
    ("Dresden", "01067-01328"),
    ("Aschaffenburg", "63739-63743"),
    ("Neuwied", "56564-56567"),
    ("Oldenburg", "26121-26135"),
    ("Ludwigshafen am Rhein", "67059-67071"),
    ("Troisdorf", "53840-53844"),
    ("Langen", "63225"),
    ("Pforzheim", "75172-75181"),
    ("Siegen", "57072-57080"),
    ("Gera", "07545-07557"),
    ("Potsdam", "14467-14482"),
    ("Neunkirchen", "66538-66540"),
    ("Aalen", "73430-73434"),
    ("Greifswald", "17489-17493"),
    ("Wiesbaden", "65183-65207"),
    ("Magdeburg", "39104-39130"),
    ("Erftstadt", "50374"),
    ("Lippstadt", "59555-59558"),
    ("Pulheim", "50259"),
    ("Offenbach", "63065-63075"),
    ("Kiel", "24103-24159"),
    ("Kaiserslautern", "67655-67663"),
    ("Rosenheim", "83022-83026"),
    ("Worms", "67547-67551"),
    ("Darmstadt", "64283-64297"),
    ("Minden", "32423-32429"),
    ("Herten", "45699-45701"),
    ("Ratingen", "40878-40885"),
    ("Paderborn", "33098-33106"),
    ("Wuppertal", "42103-42399"),
    ("Bayreuth", "95444-95448"),
    ("Ludwigsfelde", "14974"),
    ("Delmenhorst", "27749-27755"),
    ("Emden", "26721-26725"),
    ("Karlsruhe", "76131-76229"),
    ("Grevenbroich", "41515-41517"),
    ("Cottbus", "03042-03055"),
    ("Rheine", "48429-48432"),
    ("Heidelberg", "69115-69126"),
    ("Ingolstadt", "85049-85057"),
    ("Stralsund", "18435-18439"),
    ("Gelsenkirchen", "45879-45899"),
    ("Dorsten", "46282-46286"),
    ("Norderstedt", "22844-22851"),
    ("Chemnitz", "09111-09247"),
    ("Koblenz", "56068-56077"),
    ("Hagen", "58089-58135"),
    ("Heilbronn", "74072-74081"),
    ("Erfurt", "99084-99099"),
    ("Friedrichshafen", "88045-88048"),
    ("Marl", "45768-45772"),
    ("Villingen-Schwenningen", "78048-78056"),
    ("Recklinghausen", "45657-45665"),
    ("Friedberg", "61169"),
    ("Ludwigsburg", "71634-71642"),
    ("Lohne", "49393"),
    ("Unna", "59423-59427"),
    ("Wetter (Ruhr)", "58300"),
    ("Naumburg", "06618"),
    ("Dinslaken", "46535-46539"),
    ("Gummersbach", "51643-51647"),
    ("Langenfeld", "40764"),
    ("Freiburg", "79098-79117"),
    ("Bremerhaven", "27568-27580"),
    ("Gladbeck", "45964-45968"),
    ("Witten", "58452-58456"),
    ("Cuxhaven", "27472-27478"),
    ("Arnsberg", "59755-59823"),
    ("Leverkusen", "51371-51381"),
    ("Velbert", "42549-42555"),
    ("Eggenstein-Leopoldshafen", "76344"),
    ("Hilden", "40721"),
    ("Viersen", "41747-41751"),
    ("Neu-Ulm", "89231-89233"),
    ("Neubrandenburg", "17033-17036"),
    ("Bergheim", "50126-50129"),
    ("Bad Waldsee", "88339"),
    ("Bergisch Gladbach", "51427-51469"),
    ("Wolfsburg", "38440-38448"),
    ("Waiblingen", "71332-71336"),
    ("Bamberg", "96047-96052"),
    ("Mannheim", "68159-68309"),
    ("Ennigerloh", "59320"),
    ("Sonneberg", "96515"),
    ("Passau", "94032-94036"),
    ("Willich", "47877"),
    ("Kerpen", "50169-50171"),
    ("Flensburg", "24937-24944"),
    ("Baden-Baden", "76530-76534"),
    ("Fulda", "36037-36043"),
    ("Borken", "46325"),
    ("Schweinfurt", "97421-97424"),
    ("Hattingen", "45525-45527"),
    ("Schiffweiler", "66578"),
    ("Forst", "03149"),
    ("Zwickau", "08056-08066"),
    ("Detmold", "32756-32760"),
    ("Günzburg", "89312"),
    ("Stadtlohn", "48703"),
];

static GERMANY: Lazy<PostalLookup> =
    Lazy::new(|| PostalLookup::from_pairs(GERMAN_CITIES.iter().copied()));

/// Immutable mapping from city name to a postal-code range string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalLookup {
    ranges: IndexMap<String, String>,
}

impl PostalLookup {
    /// Build a lookup from `(city, range)` pairs. Later duplicates win.
    pub fn from_pairs<C, R>(pairs: impl IntoIterator<Item = (C, R)>) -> Self
    where
        C: Into<String>,
        R: Into<String>,
    {
        Self {
            ranges: pairs
                .into_iter()
                .map(|(city, range)| (city.into(), range.into()))
                .collect(),
        }
    }

    /// The built-in German city table.
    pub fn germany() -> &'static PostalLookup {
        &GERMANY
    }

    /// Load a lookup from a JSON object of `"City": "range"` entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SalescopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let lookup: PostalLookup = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(file = %path.display(), entries = lookup.len(), "loaded postal lookup");
        Ok(lookup)
    }

    /// The raw range string for a city.
    pub fn range(&self, city: &str) -> Option<&str> {
        self.ranges.get(city).map(|s| s.as_str())
    }

    /// The postal code for a city: the range text before the first `-`.
    ///
    /// Commas are not interpreted, so a single-code entry is used verbatim.
    pub fn postal_code(&self, city: &str) -> Option<&str> {
        self.range(city).map(first_code)
    }

    /// Returns true if the city is in the lookup.
    pub fn contains(&self, city: &str) -> bool {
        self.ranges.contains_key(city)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if the lookup has no entries.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate `(city, range)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ranges.iter().map(|(c, r)| (c.as_str(), r.as_str()))
    }
}

/// Text before the first `-`, or the whole string if there is none.
fn first_code(range: &str) -> &str {
    range.split('-').next().unwrap_or(range)
}
