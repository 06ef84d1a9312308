use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const RESPONDENTS: usize = 120;

/// Question blocks: suffix and number of questions.
const BLOCKS: [(char, usize); 4] = [('b', 11), ('c', 5), ('d', 5), ('i', 13)];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }

    /// Likert answer skewed towards agreement by `lean` (0 = uniform),
    /// blank about one time in twenty.
    fn likert(&mut self, lean: f64) -> Option<i64> {
        if self.next_f64() < 0.05 {
            return None;
        }
        let u = self.next_f64().powf(1.0 + lean);
        Some(1 + (u * 5.0) as i64 % 5)
    }
}

fn question_columns() -> Vec<String> {
    BLOCKS
        .iter()
        .flat_map(|&(suffix, n)| (1..=n).map(move |q| format!("Q{q}{suffix}")))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_survey.parquet".to_string());
    let mut rng = SimpleRng::new(42);

    let institutions = ["Aga Khan University", "KMTC Nairobi", "Moi University", "Kenyatta Hospital"];
    let genders = ["Female", "Male"];
    let roles = ["Faculty", "Resident/Registrar", "Clinical Student", "Health Care Worker"];
    let levels = ["Senior", "Middle", "Junior"];

    let questions = question_columns();

    let mut header: Vec<String> = ["Institution", "Gender", "Age", "Role", "Level"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(questions.iter().cloned());

    let mut text_cols: Vec<Vec<String>> = vec![Vec::new(); 4];
    let mut ages: Vec<i64> = Vec::with_capacity(RESPONDENTS);
    let mut answers: Vec<Vec<Option<i64>>> = vec![Vec::with_capacity(RESPONDENTS); questions.len()];

    for _ in 0..RESPONDENTS {
        text_cols[0].push(rng.pick(&institutions).to_string());
        text_cols[1].push(rng.pick(&genders).to_string());
        text_cols[2].push(rng.pick(&roles).to_string());
        text_cols[3].push(rng.pick(&levels).to_string());
        ages.push(22 + (rng.next_f64() * 40.0) as i64);

        for (q, column) in answers.iter_mut().enumerate() {
            let lean = (q % 4) as f64 * 0.5;
            column.push(rng.likert(lean));
        }
    }

    if Path::new(&output_path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    {
        let mut writer = csv::Writer::from_path(&output_path)?;
        writer.write_record(&header)?;
        for row in 0..RESPONDENTS {
            let mut record = vec![
                text_cols[0][row].clone(),
                text_cols[1][row].clone(),
                ages[row].to_string(),
                text_cols[2][row].clone(),
                text_cols[3][row].clone(),
            ];
            record.extend(
                answers
                    .iter()
                    .map(|col| col[row].map(|v| v.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }
        writer.flush()?;
    } else {
        let text = |i: usize| -> ArrayRef {
            Arc::new(StringArray::from(
                text_cols[i].iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            ))
        };
        let mut arrays: Vec<ArrayRef> = vec![
            text(0),
            text(1),
            Arc::new(Int64Array::from(ages.clone())),
            text(2),
            text(3),
        ];
        arrays.extend(
            answers
                .iter()
                .map(|col| Arc::new(Int64Array::from(col.clone())) as ArrayRef),
        );

        let mut fields = vec![
            Field::new("Institution", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Age", DataType::Int64, false),
            Field::new("Role", DataType::Utf8, false),
            Field::new("Level", DataType::Utf8, false),
        ];
        fields.extend(questions.iter().map(|q| Field::new(q, DataType::Int64, true)));
        let schema = Arc::new(Schema::new(fields));

        let batch = RecordBatch::try_new(schema.clone(), arrays)?;
        let file = std::fs::File::create(&output_path)?;
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;
    }

    println!(
        "Wrote {RESPONDENTS} respondents ({} questions each) to {output_path}",
        questions.len()
    );
    Ok(())
}
