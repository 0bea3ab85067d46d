//! PacBio sample sheet generation.
//!
//! A sample sheet projects a run's entity graph (run → plate wells →
//! libraries → request libraries → tags) into the fixed-column CSV the
//! instrument consumes. Each well emits one collection row; when every
//! request library in the well is tagged, one sample row per request
//! library follows it so the instrument can demultiplex.

use crate::well::WellPosition;

/// Column headers, in instrument order.
pub const COLUMN_HEADERS: [&str; 21] = [
    "System Name",
    "Run Name",
    "Is Collection",
    "Sample Well",
    "Sample Name",
    "Movie Time per SMRT Cell (hours)",
    "Insert Size (bp)",
    "Template Prep Kit Box Barcode",
    "Binding Kit Box Barcode",
    "Sequencing Kit Box Barcode",
    "On-Plate Loading Concentration (pM)",
    "DNA Control Complex Box Barcode",
    "Run Comments",
    "Sample is Barcoded",
    "Barcode Name",
    "Barcode Set",
    "Same Barcodes on Both Ends of Sequence",
    "Bio Sample Name",
    "Automation Parameters",
    "Generate HiFi Reads",
    "CCS Analysis Output - Include Kinetics Information",
];

/// Placeholder barcode used when a well's libraries disagree on their
/// template prep kit box barcode.
pub const GENERIC_KIT_BARCODE: &str = "Lxxxxx100938900123199";

/// A tag as it appears on a request library.
#[derive(Debug, Clone)]
pub struct SheetTag {
    pub group_id: String,
    pub tag_set_uuid: String,
}

/// A request pooled into a library, with its optional tag.
#[derive(Debug, Clone)]
pub struct SheetRequestLibrary {
    pub sample_name: String,
    pub tag: Option<SheetTag>,
}

impl SheetRequestLibrary {
    /// The `Barcode Name` field: the tag group id doubled, since the
    /// same barcode sits on both ends of the sequence.
    pub fn barcode_name(&self) -> Option<String> {
        let tag = self.tag.as_ref()?;
        Some(format!("{}--{}", tag.group_id, tag.group_id))
    }
}

/// A library placed in a well.
#[derive(Debug, Clone)]
pub struct SheetLibrary {
    pub template_prep_kit_box_barcode: String,
    pub request_libraries: Vec<SheetRequestLibrary>,
}

/// A well on the run's plate.
#[derive(Debug, Clone)]
pub struct SheetWell {
    pub position: WellPosition,
    pub movie_time: f64,
    pub insert_size: i32,
    pub on_plate_loading_concentration: f64,
    pub pre_extension_time: Option<i32>,
    pub generate_hifi: String,
    pub ccs_analysis_output: String,
    pub libraries: Vec<SheetLibrary>,
}

impl SheetWell {
    /// All request libraries across the well's libraries, in order.
    pub fn request_libraries(&self) -> impl Iterator<Item = &SheetRequestLibrary> {
        self.libraries
            .iter()
            .flat_map(|library| library.request_libraries.iter())
    }

    /// Sample names of every request library, joined with `separator`.
    pub fn sample_names(&self, separator: char) -> String {
        self.request_libraries()
            .map(|rl| rl.sample_name.as_str())
            .collect::<Vec<_>>()
            .join(&separator.to_string())
    }

    /// The `Sample is Barcoded` field: true when the number of request
    /// libraries equals the number of tags.
    pub fn all_libraries_tagged(&self) -> bool {
        let request_libraries = self.request_libraries().count();
        let tags = self.request_libraries().filter(|rl| rl.tag.is_some()).count();
        request_libraries == tags
    }

    /// The `Barcode Set` field: the tag set uuid, present only when
    /// every request library is tagged. All tags in a well come from
    /// the same set.
    pub fn barcode_set(&self) -> Option<&str> {
        if !self.all_libraries_tagged() {
            return None;
        }
        self.request_libraries()
            .next()
            .and_then(|rl| rl.tag.as_ref())
            .map(|tag| tag.tag_set_uuid.as_str())
    }

    /// The shared template prep kit box barcode of the well's libraries,
    /// or [`GENERIC_KIT_BARCODE`] when they differ.
    pub fn template_prep_kit_box_barcode(&self) -> &str {
        let mut barcodes = self
            .libraries
            .iter()
            .map(|library| library.template_prep_kit_box_barcode.as_str());
        let Some(first) = barcodes.next() else {
            return GENERIC_KIT_BARCODE;
        };
        if barcodes.all(|barcode| barcode == first) {
            first
        } else {
            GENERIC_KIT_BARCODE
        }
    }

    /// The `Automation Parameters` field, set only when a pre-extension
    /// time is configured and non-zero.
    pub fn automation_parameters(&self) -> Option<String> {
        match self.pre_extension_time {
            Some(time) if time != 0 => {
                Some(format!("ExtensionTime=double:{time}|ExtendFirst=boolean:True"))
            }
            _ => None,
        }
    }
}

/// The run-level fields plus its plate's wells.
#[derive(Debug, Clone)]
pub struct SheetRun {
    pub system_name: String,
    pub name: String,
    pub binding_kit_box_barcode: String,
    pub sequencing_kit_box_barcode: String,
    pub dna_control_complex_box_barcode: String,
    pub comments: String,
    pub wells: Vec<SheetWell>,
}

/// Render the sample sheet CSV for a run.
pub fn generate_sample_sheet(run: &SheetRun) -> String {
    let mut lines = Vec::with_capacity(run.wells.len() + 1);

    lines.push(
        COLUMN_HEADERS
            .iter()
            .map(|header| csv_escape(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for well in &run.wells {
        lines.push(well_row(run, well).join(","));

        // Sample rows only make sense when the instrument can tell the
        // samples apart, i.e. when every request library is tagged.
        if well.all_libraries_tagged() {
            for request_library in well.request_libraries() {
                lines.push(sample_row(well, request_library).join(","));
            }
        }
    }

    lines.join("\n")
}

/// The collection row describing the well itself.
fn well_row(run: &SheetRun, well: &SheetWell) -> Vec<String> {
    vec![
        csv_escape(&run.system_name),
        csv_escape(&run.name),
        "true".to_string(),
        well.position.with_leading_zero(),
        csv_escape(&well.sample_names(':')),
        well.movie_time.to_string(),
        well.insert_size.to_string(),
        csv_escape(well.template_prep_kit_box_barcode()),
        csv_escape(&run.binding_kit_box_barcode),
        csv_escape(&run.sequencing_kit_box_barcode),
        well.on_plate_loading_concentration.to_string(),
        csv_escape(&run.dna_control_complex_box_barcode),
        csv_escape(&run.comments),
        well.all_libraries_tagged().to_string(),
        String::new(),
        csv_escape(well.barcode_set().unwrap_or_default()),
        "true".to_string(),
        String::new(),
        csv_escape(&well.automation_parameters().unwrap_or_default()),
        csv_escape(&well.generate_hifi),
        csv_escape(&well.ccs_analysis_output),
    ]
}

/// A demultiplexing row for one tagged request library in the well.
fn sample_row(well: &SheetWell, request_library: &SheetRequestLibrary) -> Vec<String> {
    vec![
        String::new(),
        String::new(),
        "false".to_string(),
        well.position.with_leading_zero(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        csv_escape(&request_library.barcode_name().unwrap_or_default()),
        String::new(),
        String::new(),
        csv_escape(&request_library.sample_name),
        String::new(),
        String::new(),
        String::new(),
    ]
}

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
