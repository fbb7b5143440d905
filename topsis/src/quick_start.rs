/*!

# Quick start

This example ranks five phones on four criteria: price, storage, camera and
looks. Price is a cost (cheaper is better), the other criteria are benefits.

Create a file `phones.csv`:

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
M5,225,16,16,2
```

Run `topsis` with equal weights:

```bash
topsis phones.csv "0.25,0.25,0.25,0.25" "-,+,+,+" phones-result.csv
```

The program prints:

```text
Results have been saved to phones-result.csv

Note: Your input file has 4 criteria (columns excluding the first).
Make sure to provide 4 weights and 4 impacts.
```

and `phones-result.csv` contains:

```text
Model,Price,Storage,Camera,Looks,Topsis Score,Rank
M1,250,16,12,5,0.5342768571821003,3
M2,200,16,8,3,0.3083677687324685,5
M3,300,32,16,4,0.6916322312675315,1
M4,275,32,8,4,0.534736584486838,2
M5,225,16,16,2,0.40104612151678615,4
```

`M3` is the best compromise: it is the most expensive phone but it leads on
storage and camera.

To see the intermediate steps, add `--verbose`:

```text
[2026-10-19T09:55:59Z INFO  topsis] Processing 5 alternatives on 4 criteria
[2026-10-19T09:55:59Z DEBUG topsis] score: impacts: -,+,+,+
[2026-10-19T09:55:59Z DEBUG topsis] score: column norms: [564.5794895318107, 53.0659966456864, 28.0, 8.366600265340756]
...
[2026-10-19T09:55:59Z INFO  topsis] Alternative 3: score 0.691632 rank 1
```

The same computation from Rust:

```
use topsis::builder::Builder;

let mut builder = Builder::new("0.25,0.25,0.25,0.25", "-,+,+,+")?;
builder.add_alternative("M1", &[250.0, 16.0, 12.0, 5.0])?;
builder.add_alternative("M2", &[200.0, 16.0, 8.0, 3.0])?;
builder.add_alternative("M3", &[300.0, 32.0, 16.0, 4.0])?;
builder.add_alternative("M4", &[275.0, 32.0, 8.0, 4.0])?;
builder.add_alternative("M5", &[225.0, 16.0, 16.0, 2.0])?;

let ranking = builder.rank()?;
assert_eq!(ranking[0].identifier, "M3");
assert_eq!(ranking[0].rank, 1);
# Ok::<(), topsis::TopsisError>(())
```

See the [manual](../manual/index.html) for all the options.

*/
