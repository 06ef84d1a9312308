// ---------------------------------------------------------------------------
// Section table: navigation entries and the charts each one shows
// ---------------------------------------------------------------------------

/// How a column is summarised and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Five-point agreement scale, percentages over fixed categories.
    Likert,
    /// Nominal column drawn as one bar per value.
    Bar,
    /// Nominal column drawn as a pie.
    Pie,
}

/// One chart of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub heading: &'static str,
    pub charts: &'static [ChartSpec],
}

const fn likert(column: &'static str, label: &'static str) -> ChartSpec {
    ChartSpec {
        column,
        label,
        kind: ChartKind::Likert,
    }
}

const fn nominal(column: &'static str, kind: ChartKind) -> ChartSpec {
    ChartSpec {
        column,
        label: column,
        kind,
    }
}

/// Demographic columns, also offered as respondent filters.
pub const DEMOGRAPHIC_COLUMNS: [&str; 5] = ["Institution", "Gender", "Age", "Role", "Level"];

/// All sections, in navigation order.
pub const SECTIONS: &[Section] = &[
    Section {
        name: "Demographics",
        heading: "Demographics Analysis",
        charts: &[
            nominal("Institution", ChartKind::Bar),
            nominal("Gender", ChartKind::Pie),
            nominal("Age", ChartKind::Bar),
            nominal("Role", ChartKind::Bar),
            nominal("Level", ChartKind::Pie),
        ],
    },
    Section {
        name: "General Knowledge",
        heading: "General Knowledge and Understanding of Quality Improvement",
        charts: &[
            likert("Q1b", "Six Dimensions of QI well understood"),
            likert("Q2b", "The key principles well understood"),
            likert("Q3b", "Key stakeholders and their roles are well known and appreciated"),
            likert("Q4b", "Faculty, residents/registrars and clinical rotation students have skills to analyze and prioritize QI"),
            likert("Q5b", "Faculty, residents/registrars, clinical rotation students have knowledge to identify performance indicators"),
            likert("Q6b", "Faculty competency development need for QI integration has been assessed and identified"),
            likert("Q7b", "There is a strategy for Capacity building of the requisite faculty competency"),
            likert("Q8b", "There is adequate ongoing coaching and mentoring on QI"),
            likert("Q9b", "Leadership and management provides conducive environment and support for QI"),
            likert("Q10b", "There is adequate Understanding of the complexities of health systems"),
            likert("Q11b", "There is adequate provision of Continuity of care"),
        ],
    },
    Section {
        name: "Effective Communication",
        heading: "Effective Communication",
        charts: &[
            likert("Q1c", "Patients and carers are involved fully as partners in health care"),
            likert("Q2c", "Health Care Risks are adequately Communicated to patients by health workers"),
            likert("Q3c", "There is adequate and honest Communication with patients after an adverse event (open disclosure)"),
            likert("Q4c", "Informed consent of patient/client is always obtained when necessary"),
            likert("Q5c", "Students are taught and guided to be culturally respectful and knowledgeable (Cultural Competence)"),
        ],
    },
    Section {
        name: "Managing Adverse Events",
        heading: "Identifying, Preventing, and Managing Adverse Events",
        charts: &[
            likert("Q1d", "Students / HCW are taught how to recognize, report and manage adverse events and near misses."),
            likert("Q2d", "Students are taught principles and practical applications in Managing Clinical Care Risks"),
            likert("Q3d", "Students/ HCW have adequate Understanding of health-care errors"),
            likert("Q4d", "Students/ HCW know how to Manage complaints in health care settings"),
            likert("Q5d", "There is an anonymous/confidential system of reporting medical errors"),
        ],
    },
    Section {
        name: "Specific Issues",
        heading: "Specific Issues",
        charts: &[
            likert("Q1i", "Students/HCW know and understand how to Prevent or avoid wrong site, wrong procedure and wrong patient treatment"),
            likert("Q2i", "Students/HCW have adequate understanding of Medication safety"),
            likert("Q3i", "Students/HCW have adequate understanding and practice of Infection prevention and control"),
            likert("Q4i", "Clinical treatment and care in practicum facilities is Patient-centered"),
            likert("Q5i", "Patients in practicum facilities always receive treatment and care without harmful delays"),
            likert("Q6i", "The treatment and care in practicum facilities is Efficient"),
            likert("Q7i", "The treatment and care in practicum facilities is Equitable"),
            likert("Q8i", "The institution has a committee or unit in charge of quality standards of curriculum"),
            likert("Q9i", "The vision and mission of the institution include statements about quality of curriculum"),
            likert("Q10i", "The current strategic plan includes quality improvement objectives"),
            likert("Q11i", "The clinical placements facilities and resources are adequate"),
            likert("Q12i", "The organization includes statements on quality improvement and patient safety"),
            likert("Q13i", "Faculty/Facility leadership are trained on quality improvement concepts"),
        ],
    },
];

/// Look up a section by its navigation name (case-insensitive).
pub fn find_section(name: &str) -> Option<usize> {
    SECTIONS
        .iter()
        .position(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// Every column the section table refers to, in table order.
pub fn referenced_columns() -> impl Iterator<Item = &'static str> {
    SECTIONS
        .iter()
        .flat_map(|s| s.charts.iter().map(|c| c.column))
}
