/*!

This is the long-form manual for `topsis` and the `topsis` command line tool.

## Usage

```text
topsis <InputDataFile> <Weights> <Impacts> <ResultFileName>
```

For example:

```text
topsis data.csv "1,1,1,2" "-,+,+,+" result.csv
```

All four parameters are required. Each of them may also come from a
configuration file (see [below](#configuration)); the values on the command
line take precedence.

## Input formats

### csv

A delimited text file with a header row. The first column identifies the
alternatives and is copied to the output as is. All the other columns are
criteria and must only contain numbers:

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
```

At least three columns are required (the identifier and two criteria).
Empty cells are rejected: missing values are not supported.

The file does not need to be encoded in UTF-8. The encoding is detected from
the byte order mark if there is one, and guessed from the content otherwise.
The delimiter defaults to `,` and can be changed with `--delimiter`.

### xlsx

Files with the `.xlsx` extension are read as Excel workbooks. The first
worksheet is used unless `--excel-worksheet-name` is given. The layout is the
same as for CSV: a header row, then one row per alternative.

## Weights and impacts

Weights are a comma-separated list of strictly positive numbers, one per
criterion: `"1,1,1,2"`. Impacts are a comma-separated list of `+` (higher is
better) and `-` (lower is better) symbols, one per criterion: `"-,+,+,+"`.

## Output

The result file contains the input table with two more columns:
`Topsis Score` and `Rank`. The rows are kept in the input order. Rank 1 is
the best alternative. Alternatives with exactly the same score still get
distinct ranks: the one appearing last in the input is ranked first.

The output is always written in UTF-8, with the delimiter of the input.

## Checking against a reference

With `--reference <file>`, the result is compared to a previous result
file. Scores must agree within `1e-9` and ranks must be identical.
Differences are printed as a line diff and the program exits with an error.

## Configuration

The option `--config <file.json>` reads the parameters from a JSON file.
All keys are optional:

```text
{
  "inputFile": "data.csv",
  "weights": [1, 1, 1, 2],
  "impacts": "-,+,+,+",
  "resultFile": "result.csv",
  "referenceFile": "expected.csv",
  "excelWorksheetName": "Sheet1",
  "delimiter": ";"
}
```

`weights` and `impacts` may be written either as a string or as an array.
Relative paths are resolved against the directory of the configuration file.

## Logging

`--verbose` prints the intermediate steps of the algorithm (column norms,
ideal points, separations) on the standard error. The `RUST_LOG`
environment variable is also honored.

 */
