pub mod plot_view;
