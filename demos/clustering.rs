//! DBSCAN on a small 2D dataset, with and without a reduction step.

use denscan::reduce::{RandomProjection, Reduced};
use denscan::{Clustering, Dbscan, DbscanModel, Marker, Metric};

fn main() -> denscan::Result<()> {
    // Three well-separated clusters in 2D plus two outliers.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Outliers
        vec![2.5, 8.0],
        vec![-6.0, 3.0],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    // --- DBSCAN (eps=1.0, min_samples=2) ---
    let mut model = DbscanModel::new(Dbscan::new(1.0, 2)?.with_metric(Metric::Euclidean));
    let (n_clusters, n_noise) = {
        let fit = model.fit(&data)?;
        (fit.n_clusters(), fit.n_noise())
    };
    println!("=== {} ===", model.params());
    println!("clusters: {n_clusters}, noise: {n_noise}");

    for series in model.series()? {
        let tag = match series.marker {
            Marker::Cross => "noise".to_string(),
            Marker::Dot => format!("cluster {}", series.label),
        };
        println!("  {:10} => {:?}", tag, series.indices);
    }

    // --- Same clustering behind a random projection to 1 dimension ---
    let pipeline = Reduced::new(RandomProjection::new().with_seed(42), Dbscan::new(1.0, 2)?)
        .with_n_components(1);
    let labels = pipeline.fit_predict(&data)?;
    println!("\n=== projected to 1D ===");
    for (i, label) in labels.iter().enumerate() {
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => {}",
            i, data[i][0], data[i][1], label
        );
    }

    Ok(())
}
