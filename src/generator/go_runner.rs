//! Rendering of `runner_test.go`, `tested.go` and `compare.go`.

use super::{GeneratorError, GeneratorOptions};
use crate::analysis::type_signatures::{
    check_signature_types, is_float_type, GoParam, GoSignature, GoType,
};
use crate::testcases::{input_keys, TestCase};
use std::fmt::{self, Write};
use tracing::debug;

const COMPARE_TEMPLATE: &str = include_str!("templates/compare.go");

/// The three Go sources of a benchmark harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHarness {
    pub runner_test_go: String,
    pub tested_go: String,
    pub compare_go: String,
}

impl GeneratedHarness {
    pub const RUNNER_FILE: &'static str = "runner_test.go";
    pub const TESTED_FILE: &'static str = "tested.go";
    pub const COMPARE_FILE: &'static str = "compare.go";

    /// File names paired with their contents.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (Self::RUNNER_FILE, self.runner_test_go.as_str()),
            (Self::TESTED_FILE, self.tested_go.as_str()),
            (Self::COMPARE_FILE, self.compare_go.as_str()),
        ]
    }
}

struct InputField {
    name: String,
    ty: String,
    tag: String,
    variadic: bool,
}

struct RunnerPlan<'a> {
    function: &'a str,
    test_name: String,
    fields: Vec<InputField>,
    expected_type: String,
    /// Left-hand side of the call, e.g. `actual, err`.
    assignment: String,
    checks_error: bool,
    tolerance: f64,
}

/// Render a harness that runs `cases` against `signature`.
pub fn generate_harness(
    signature: &GoSignature,
    cases: &[TestCase],
    options: &GeneratorOptions,
) -> Result<GeneratedHarness, GeneratorError> {
    let plan = plan_runner(signature, cases, options)?;
    debug!(
        function = plan.function,
        inputs = plan.fields.len(),
        tolerance = plan.tolerance,
        "rendering harness"
    );

    Ok(GeneratedHarness {
        runner_test_go: render_runner(&plan, options)?,
        tested_go: render_stub(signature, options)?,
        compare_go: COMPARE_TEMPLATE.replace("{{package}}", &options.package),
    })
}

fn plan_runner<'a>(
    signature: &'a GoSignature,
    cases: &[TestCase],
    options: &GeneratorOptions,
) -> Result<RunnerPlan<'a>, GeneratorError> {
    let check = check_signature_types(signature);
    if check.has_non_basic_types {
        return Err(GeneratorError::NonBasicTypes {
            types: check.non_basic_types,
        });
    }

    let function = signature
        .name
        .as_deref()
        .filter(|name| !name.is_empty() && *name != "_")
        .ok_or(GeneratorError::MissingName)?;
    if signature.receiver.is_some() {
        return Err(GeneratorError::Method);
    }
    if !signature.type_params.is_empty() {
        return Err(GeneratorError::TypeParameters);
    }

    let results = flatten(&signature.results);
    let values: Vec<&GoType> = results
        .iter()
        .map(|(_, ty)| *ty)
        .filter(|ty| !is_error(ty))
        .collect();
    let expected = match values.as_slice() {
        [] => return Err(GeneratorError::NoResults),
        [single] => *single,
        many => return Err(GeneratorError::MultipleResults { count: many.len() }),
    };
    let errors = results.len() - values.len();
    if errors > 1 {
        return Err(GeneratorError::MultipleErrors);
    }

    let assignment = results
        .iter()
        .map(|(_, ty)| if is_error(ty) { "err" } else { "actual" })
        .collect::<Vec<_>>()
        .join(", ");

    let holds_float = expected.any(&|ty| ty.as_named().is_some_and(is_float_type));
    let tolerance = if holds_float {
        options.float_tolerance
    } else {
        options.default_tolerance
    };

    Ok(RunnerPlan {
        function,
        test_name: format!("Test{}", exported_name(function)),
        fields: input_fields(signature, &input_keys(cases)),
        expected_type: expected.to_string(),
        assignment,
        checks_error: errors == 1,
        tolerance,
    })
}

fn flatten(params: &[GoParam]) -> Vec<(Option<&str>, &GoType)> {
    params
        .iter()
        .flat_map(|param| {
            if param.names.is_empty() {
                vec![(None, &param.ty)]
            } else {
                param
                    .names
                    .iter()
                    .map(|name| (Some(name.as_str()), &param.ty))
                    .collect()
            }
        })
        .collect()
}

fn is_error(ty: &GoType) -> bool {
    ty.as_named() == Some("error")
}

fn input_fields(signature: &GoSignature, keys: &[String]) -> Vec<InputField> {
    let mut fields: Vec<InputField> = Vec::new();
    for (i, (name, ty)) in flatten(&signature.params).into_iter().enumerate() {
        let param = match name {
            Some(name) if name != "_" => name.to_string(),
            _ => format!("arg{i}"),
        };

        let mut field_name = exported_name(&param);
        if fields.iter().any(|f| f.name == field_name) {
            field_name = format!("{field_name}{i}");
        }

        let (ty, variadic) = match ty {
            GoType::Variadic(elem) => (GoType::Slice(elem.clone()).to_string(), true),
            other => (other.to_string(), false),
        };

        fields.push(InputField {
            name: field_name,
            tag: json_tag(&param, keys),
            ty,
            variadic,
        });
    }
    fields
}

/// `line_index` becomes `LineIndex`.
fn exported_name(name: &str) -> String {
    let camel: String = name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if camel.is_empty() {
        "Value".to_string()
    } else {
        camel
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The test-case input key naming `param`, ignoring case and underscores.
fn json_tag(param: &str, keys: &[String]) -> String {
    let wanted = normalize_key(param);
    keys.iter()
        .find(|key| key.as_str() == param)
        .or_else(|| keys.iter().find(|key| normalize_key(key) == wanted))
        .cloned()
        .unwrap_or_else(|| param.to_string())
}

fn go_string(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn write_inputs(out: &mut String, fields: &[InputField]) -> fmt::Result {
    if fields.is_empty() {
        return writeln!(out, "\tInputs struct{{}} `json:\"Inputs\"`");
    }

    let name_width = fields.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    let type_width = fields.iter().map(|f| f.ty.chars().count()).max().unwrap_or(0);

    writeln!(out, "\tInputs struct {{")?;
    for field in fields {
        writeln!(
            out,
            "\t\t{:<name_width$} {:<type_width$} `json:\"{}\"`",
            field.name, field.ty, field.tag
        )?;
    }
    writeln!(out, "\t}} `json:\"Inputs\"`")
}

fn write_load_test_cases(out: &mut String) -> fmt::Result {
    writeln!(out, "// loadTestCases reads and decodes the test-case file at path.")?;
    writeln!(out, "func loadTestCases(path string) ([]TestCase, error) {{")?;
    writeln!(out, "\tdata, err := os.ReadFile(path)")?;
    writeln!(out, "\tif err != nil {{")?;
    writeln!(out, "\t\treturn nil, fmt.Errorf(\"failed to read test cases: %v\", err)")?;
    writeln!(out, "\t}}")?;
    writeln!(out)?;
    writeln!(out, "\tvar testCases []TestCase")?;
    writeln!(out, "\tif err := json.Unmarshal(data, &testCases); err != nil {{")?;
    writeln!(out, "\t\treturn nil, fmt.Errorf(\"failed to parse test cases: %v\", err)")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn testCases, nil")?;
    writeln!(out, "}}")
}

fn render_runner(plan: &RunnerPlan<'_>, options: &GeneratorOptions) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "package {}", options.package)?;
    writeln!(out)?;
    writeln!(out, "import (")?;
    for import in ["encoding/json", "fmt", "os", "testing"] {
        writeln!(out, "\t\"{import}\"")?;
    }
    writeln!(out, ")")?;
    writeln!(out)?;

    writeln!(out, "// TestCase mirrors one entry of the test-case file.")?;
    writeln!(out, "type TestCase struct {{")?;
    write_inputs(&mut out, &plan.fields)?;
    writeln!(out, "\tExpected {} `json:\"Expected\"`", plan.expected_type)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    write_load_test_cases(&mut out)?;
    writeln!(out)?;

    let arguments = plan
        .fields
        .iter()
        .map(|f| {
            if f.variadic {
                format!("tc.Inputs.{}...", f.name)
            } else {
                format!("tc.Inputs.{}", f.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(
        out,
        "// {} runs every test case against {}.",
        plan.test_name, plan.function
    )?;
    writeln!(out, "func {}(t *testing.T) {{", plan.test_name)?;
    writeln!(
        out,
        "\ttestCases, err := loadTestCases({})",
        go_string(&options.test_cases_path)
    )?;
    writeln!(out, "\tif err != nil {{")?;
    writeln!(out, "\t\tt.Fatalf(\"Failed to load test cases: %v\", err)")?;
    writeln!(out, "\t}}")?;
    writeln!(out)?;
    writeln!(out, "\tfor i, tc := range testCases {{")?;
    writeln!(out, "\t\tt.Run(fmt.Sprintf(\"Case%d\", i), func(t *testing.T) {{")?;
    writeln!(
        out,
        "\t\t\t{} := {}({})",
        plan.assignment, plan.function, arguments
    )?;
    if plan.checks_error {
        writeln!(out, "\t\t\tif err != nil {{")?;
        writeln!(
            out,
            "\t\t\t\tt.Errorf(\"Case %d returned an unexpected error\\nInput: %v\\nError: %v\", i, tc.Inputs, err)"
        )?;
        writeln!(out, "\t\t\t\treturn")?;
        writeln!(out, "\t\t\t}}")?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "\t\t\tif !DeepCompare(actual, tc.Expected, {:?}) {{",
        plan.tolerance
    )?;
    writeln!(
        out,
        "\t\t\t\tt.Errorf(\"Case %d failed\\nInput:    %v\\nExpected: %v\\nActual:   %v\", i, tc.Inputs, tc.Expected, actual)"
    )?;
    writeln!(out, "\t\t\t}}")?;
    writeln!(out, "\t\t}})")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;

    Ok(out)
}

fn render_stub(signature: &GoSignature, options: &GeneratorOptions) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "package {}", options.package)?;
    writeln!(out)?;
    writeln!(out, "{signature} {{")?;
    writeln!(out, "\t// TODO: Implement")?;
    writeln!(out, "\tpanic(\"not implemented\")")?;
    writeln!(out, "}}")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::type_signatures::classify_signature;
    use crate::testcases::parse_test_cases;
    use pretty_assertions::assert_eq;

    fn signature(source: &str) -> GoSignature {
        classify_signature(source).unwrap().parsed
    }

    fn options() -> GeneratorOptions {
        GeneratorOptions {
            float_tolerance: 0.5,
            ..GeneratorOptions::default()
        }
    }

    fn cases(json: &str) -> Vec<TestCase> {
        parse_test_cases(json).unwrap()
    }

    #[test]
    fn renders_basic_runner() {
        let sig = signature("func GetLevel(lines []string, line_index int) int");
        let cases = cases(r#"[{"Inputs": {"lines": ["a"], "lineIndex": 0}, "Expected": 0}]"#);
        let harness = generate_harness(&sig, &cases, &options()).unwrap();

        let runner = &harness.runner_test_go;
        assert!(runner.starts_with("package main\n"));
        assert!(runner.contains("\t\tLines     []string `json:\"lines\"`\n"));
        assert!(runner.contains("\t\tLineIndex int      `json:\"lineIndex\"`\n"));
        assert!(runner.contains("\tExpected int `json:\"Expected\"`\n"));
        assert!(runner.contains("func TestGetLevel(t *testing.T) {"));
        assert!(runner.contains("loadTestCases(\"test_cases/test_cases.json\")"));
        assert!(runner.contains("\t\t\tactual := GetLevel(tc.Inputs.Lines, tc.Inputs.LineIndex)\n"));
        assert!(runner.contains("DeepCompare(actual, tc.Expected, 0.0)"));
        assert!(!runner.contains("if err != nil {\n\t\t\t\tt.Errorf"));
    }

    #[test]
    fn float_results_use_float_tolerance() {
        let sig = signature("func Mean(values []float64) (float64, error)");
        let harness = generate_harness(&sig, &[], &options()).unwrap();

        let runner = &harness.runner_test_go;
        assert!(runner.contains("\t\t\tactual, err := Mean(tc.Inputs.Values)\n"));
        assert!(runner.contains("returned an unexpected error"));
        assert!(runner.contains("DeepCompare(actual, tc.Expected, 0.5)"));
    }

    #[test]
    fn variadic_params_are_spread() {
        let sig = signature("func Sum(base int, nums ...int) int");
        let harness = generate_harness(&sig, &[], &options()).unwrap();

        let runner = &harness.runner_test_go;
        assert!(runner.contains("\t\tBase int   `json:\"base\"`\n"));
        assert!(runner.contains("\t\tNums []int `json:\"nums\"`\n"));
        assert!(runner.contains("Sum(tc.Inputs.Base, tc.Inputs.Nums...)"));
    }

    #[test]
    fn unnamed_params_get_positional_names() {
        let sig = signature("func Double(int) int");
        let harness = generate_harness(&sig, &[], &options()).unwrap();

        let runner = &harness.runner_test_go;
        assert!(runner.contains("\t\tArg0 int `json:\"arg0\"`\n"));
        assert!(runner.contains("Double(tc.Inputs.Arg0)"));
    }

    #[test]
    fn no_params_render_empty_inputs() {
        let sig = signature("func Answer() int");
        let harness = generate_harness(&sig, &[], &options()).unwrap();
        assert!(harness
            .runner_test_go
            .contains("\tInputs struct{} `json:\"Inputs\"`\n"));
        assert!(harness.runner_test_go.contains("actual := Answer()"));
    }

    #[test]
    fn stub_and_compare_files() {
        let sig = signature("func Add(a, b int) int");
        let opts = GeneratorOptions {
            package: "bench".to_string(),
            ..options()
        };
        let harness = generate_harness(&sig, &[], &opts).unwrap();

        assert_eq!(
            harness.tested_go,
            "package bench\n\nfunc Add(a, b int) int {\n\t// TODO: Implement\n\tpanic(\"not implemented\")\n}\n"
        );
        assert!(harness.compare_go.starts_with("package bench\n"));
        assert!(harness.compare_go.contains("func DeepCompare("));
        assert!(harness.runner_test_go.starts_with("package bench\n"));

        let names: Vec<_> = harness.files().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["runner_test.go", "tested.go", "compare.go"]);
    }

    #[test]
    fn rejects_non_basic_types() {
        let sig = signature("func Walk(root *Node, visit func(int)) error");
        let err = generate_harness(&sig, &[], &options()).unwrap_err();
        match err {
            GeneratorError::NonBasicTypes { types } => {
                assert_eq!(types, vec!["Node", "func(...)"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unsupported_results() {
        let none = signature("func Log(msg string)");
        assert!(matches!(
            generate_harness(&none, &[], &options()),
            Err(GeneratorError::NoResults)
        ));

        let only_error = signature("func Check(v int) error");
        assert!(matches!(
            generate_harness(&only_error, &[], &options()),
            Err(GeneratorError::NoResults)
        ));

        let pair = signature("func Split(s string) (head, tail string)");
        assert!(matches!(
            generate_harness(&pair, &[], &options()),
            Err(GeneratorError::MultipleResults { count: 2 })
        ));
    }

    #[test]
    fn rejects_methods_and_literals() {
        let method = signature("func (s *Stack) Len() int");
        assert!(generate_harness(&method, &[], &options()).is_err());

        let literal = signature("func(a int) int { return a }");
        assert!(matches!(
            generate_harness(&literal, &[], &options()),
            Err(GeneratorError::MissingName)
        ));
    }

    #[test]
    fn rejects_generic_functions() {
        let generic = signature("func First[T any](xs []int, fallback int) int");
        assert!(!check_signature_types(&generic).has_non_basic_types);
        assert!(matches!(
            generate_harness(&generic, &[], &options()),
            Err(GeneratorError::TypeParameters)
        ));
    }

    #[test]
    fn matches_keys_ignoring_case_and_underscores() {
        let keys = vec!["ProcessedStr".to_string(), "processed_str".to_string()];
        assert_eq!(json_tag("processed_str", &keys), "processed_str");
        assert_eq!(json_tag("processedStr", &keys), "ProcessedStr");
        assert_eq!(json_tag("other", &keys), "other");
    }

    #[test]
    fn exports_snake_case_names() {
        assert_eq!(exported_name("line_index"), "LineIndex");
        assert_eq!(exported_name("x"), "X");
        assert_eq!(exported_name("_"), "Value");
    }
}
